//! Error types for scriptyard-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from envelope encoding and decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The envelope's structure could not be understood.
    #[error("malformed envelope: {reason}")]
    Malformed { reason: String },

    /// The envelope parsed but carried no `id` element.
    #[error("envelope is missing its id element")]
    MissingId,

    /// XML writer failure while re-serialising a record.
    #[error("XML write error: {0}")]
    Xml(#[from] quick_xml::Error),
}

impl CodecError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        CodecError::Malformed {
            reason: reason.into(),
        }
    }
}

/// All errors that can arise from loading the preferences file.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// Underlying I/O failure (permission denied, etc.).
    #[error("I/O error reading preferences: {0}")]
    Io(#[from] std::io::Error),

    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// The preferences YAML file did not exist at the expected path.
    #[error("preferences not found at {path}")]
    NotFound { path: PathBuf },

    /// YAML parse error on load — includes file path and line context from serde_yaml.
    #[error("failed to parse preferences at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}
