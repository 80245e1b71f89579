//! Error types for scriptyard-jamf.

use thiserror::Error;

/// All errors that can arise from talking to the server.
#[derive(Debug, Error)]
pub enum JamfError {
    /// A read (GET) came back with a non-success status.
    #[error("GET {url} failed with status {status}")]
    RemoteUnavailable { status: u16, url: String },

    /// A write (PUT/DELETE) came back with a non-success status.
    #[error("write to {url} rejected with status {status}")]
    RemoteRejected { status: u16, url: String },

    /// The request never produced a status — DNS, refused connection, TLS.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: Box<ureq::Error>,
    },

    /// The response arrived but its payload could not be read or parsed.
    #[error("unreadable response from {url}: {source}")]
    Payload {
        url: String,
        #[source]
        source: std::io::Error,
    },
}
