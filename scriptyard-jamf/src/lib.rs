//! # scriptyard-jamf
//!
//! Typed, blocking client for the Jamf Pro scripts collection.
//!
//! Every call is a single network request — no retries, no caching. A failed
//! call surfaces as a [`JamfError`] and the caller is expected to abort its
//! whole pipeline (fail-fast policy).

pub mod client;
pub mod error;

pub use client::{JamfClient, ScriptSummary, ScriptsRemote};
pub use error::JamfError;
