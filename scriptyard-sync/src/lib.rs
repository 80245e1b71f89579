//! # scriptyard-sync
//!
//! The sync engine: local mirror store, change-set resolver, git plumbing,
//! commit/publish controller, and the per-subcommand orchestration.
//!
//! Every operation is a linear pipeline — the first failing step aborts the
//! whole subcommand and the working copy is left exactly as it was at that
//! instant. There is no retry and no compensating rollback.

pub mod changeset;
pub mod error;
pub mod git;
pub mod mirror;
pub mod ops;
pub mod publish;

pub use error::{GitError, MirrorError, SyncError};
pub use mirror::{Mirror, WriteOutcome};
pub use ops::{DownloadedScript, NewScript};
pub use publish::PublishOpts;
