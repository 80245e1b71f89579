//! Error types for scriptyard-sync.

use std::path::PathBuf;

use thiserror::Error;

use scriptyard_core::error::CodecError;
use scriptyard_jamf::JamfError;

/// All errors that can arise from the local mirror store.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// A configured mirror directory does not exist.
    #[error("mirror directory {path} does not exist")]
    MissingDir { path: PathBuf },

    /// An expected local file was absent.
    #[error("no local copy at {path}")]
    NotFound { path: PathBuf },

    /// The script name would escape the mirror directory.
    #[error("unsafe script name '{name}'")]
    UnsafeName { name: String },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`MirrorError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> MirrorError {
    MirrorError::Io {
        path: path.into(),
        source,
    }
}

/// All errors that can arise from running git.
#[derive(Debug, Error)]
pub enum GitError {
    /// git itself could not be started.
    #[error("could not run git: {0}")]
    Launch(#[from] std::io::Error),

    /// git ran and exited non-zero. `detail` holds only the first few lines
    /// of stderr — git can print a heap.
    #[error("git {action} failed:\n{detail}")]
    Failed { action: String, detail: String },
}

/// All errors that can arise from a sync operation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An envelope failed to decode or re-encode.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    /// The server refused or never answered.
    #[error("remote error: {0}")]
    Remote(#[from] JamfError),

    /// The local mirror store failed.
    #[error("mirror error: {0}")]
    Mirror(#[from] MirrorError),

    /// A git invocation failed.
    #[error("git error: {0}")]
    Git(#[from] GitError),

    /// The upload change-set was empty — a terminal no-op, not a crash.
    #[error("no files to process")]
    NoPendingChanges,
}
