//! The two-directory local mirror.
//!
//! Each script is a pair of files sharing one name: the full XML envelope in
//! `xml_dir`, the extracted body in `sh_dir`. Both directories are git
//! working copies; this module never touches git itself.

use std::path::{Path, PathBuf};

use scriptyard_core::types::ScriptName;

use crate::error::{io_err, MirrorError};

/// Outcome of an individual mirror write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File was written (new, or overwritten under force).
    Written { path: PathBuf },
    /// File already existed and `force` was off — left untouched.
    Skipped { path: PathBuf },
}

/// Handle on the two mirror directories.
#[derive(Debug, Clone)]
pub struct Mirror {
    xml_dir: PathBuf,
    sh_dir: PathBuf,
}

impl Mirror {
    /// Both directories must already exist — they are working copies the
    /// user cloned, not something we create behind their back.
    pub fn new(xml_dir: PathBuf, sh_dir: PathBuf) -> Result<Self, MirrorError> {
        for dir in [&xml_dir, &sh_dir] {
            if !dir.is_dir() {
                return Err(MirrorError::MissingDir { path: dir.clone() });
            }
        }
        Ok(Mirror { xml_dir, sh_dir })
    }

    pub fn xml_dir(&self) -> &Path {
        &self.xml_dir
    }

    pub fn sh_dir(&self) -> &Path {
        &self.sh_dir
    }

    /// Path of the envelope file for `name`.
    pub fn envelope_path(&self, name: &ScriptName) -> Result<PathBuf, MirrorError> {
        Ok(self.xml_dir.join(checked_name(name)?))
    }

    /// Path of the body file for `name`.
    pub fn body_path(&self, name: &ScriptName) -> Result<PathBuf, MirrorError> {
        Ok(self.sh_dir.join(checked_name(name)?))
    }

    pub fn write_envelope(
        &self,
        name: &ScriptName,
        raw: &str,
        force: bool,
    ) -> Result<WriteOutcome, MirrorError> {
        write(self.envelope_path(name)?, raw, force)
    }

    pub fn write_body(
        &self,
        name: &ScriptName,
        text: &str,
        force: bool,
    ) -> Result<WriteOutcome, MirrorError> {
        write(self.body_path(name)?, text, force)
    }

    pub fn read_envelope(&self, name: &ScriptName) -> Result<String, MirrorError> {
        read(self.envelope_path(name)?)
    }

    pub fn read_body(&self, name: &ScriptName) -> Result<String, MirrorError> {
        read(self.body_path(name)?)
    }
}

fn write(path: PathBuf, contents: &str, force: bool) -> Result<WriteOutcome, MirrorError> {
    if !force && path.exists() {
        tracing::debug!(path = %path.display(), "exists, skipping write");
        return Ok(WriteOutcome::Skipped { path });
    }
    std::fs::write(&path, contents).map_err(|e| io_err(&path, e))?;
    tracing::debug!(path = %path.display(), "wrote");
    Ok(WriteOutcome::Written { path })
}

fn read(path: PathBuf) -> Result<String, MirrorError> {
    if !path.exists() {
        return Err(MirrorError::NotFound { path });
    }
    std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))
}

/// A script name is a bare filename; anything that could traverse out of the
/// mirror directory is rejected before any I/O.
fn checked_name(name: &ScriptName) -> Result<&str, MirrorError> {
    let n = name.0.as_str();
    let unsafe_name = n.is_empty()
        || n == "."
        || n == ".."
        || n.contains('/')
        || n.contains('\\')
        || n.contains('\0');
    if unsafe_name {
        return Err(MirrorError::UnsafeName { name: n.to_owned() });
    }
    Ok(n)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
