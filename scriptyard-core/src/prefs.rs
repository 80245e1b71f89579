//! Preferences file.
//!
//! # Storage layout
//!
//! ```text
//! ~/.scriptyard/
//!   prefs.yaml    (server URL, credentials, the two mirror roots)
//! ```
//!
//! # API pattern
//!
//! Every function has two forms:
//! - `fn_at(home: &Path)` — explicit home; used in tests with `TempDir`
//! - `fn()` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::PrefsError;

/// Everything one invocation needs to reach the server and the mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Base server URL, e.g. `https://example.jamfcloud.com`.
    pub server_url: String,
    pub username: String,
    pub password: String,
    /// Directory holding the XML envelope files (a git working copy).
    pub xml_dir: PathBuf,
    /// Directory holding the plain script bodies (a git working copy).
    pub sh_dir: PathBuf,
}

/// `<home>/.scriptyard/prefs.yaml` — pure, no I/O.
pub fn prefs_path_at(home: &Path) -> PathBuf {
    home.join(".scriptyard").join("prefs.yaml")
}

/// Load preferences rooted at `home`, expanding `~/` in the mirror paths.
///
/// Returns `PrefsError::NotFound` if absent,
/// `PrefsError::Parse` (with path + line context) if malformed YAML.
pub fn load_at(home: &Path) -> Result<Preferences, PrefsError> {
    let path = prefs_path_at(home);
    if !path.exists() {
        return Err(PrefsError::NotFound { path });
    }
    let contents = std::fs::read_to_string(&path)?;
    let mut prefs: Preferences =
        serde_yaml::from_str(&contents).map_err(|e| PrefsError::Parse { path, source: e })?;
    prefs.xml_dir = expand_tilde(&prefs.xml_dir, home);
    prefs.sh_dir = expand_tilde(&prefs.sh_dir, home);
    Ok(prefs)
}

/// `load_at` convenience wrapper.
pub fn load() -> Result<Preferences, PrefsError> {
    load_at(&home()?)
}

fn home() -> Result<PathBuf, PrefsError> {
    dirs::home_dir().ok_or(PrefsError::HomeNotFound)
}

/// Replace a leading `~` with `home`; anything else passes through.
fn expand_tilde(path: &Path, home: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}
