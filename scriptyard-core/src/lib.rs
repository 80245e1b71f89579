//! Scriptyard core library — domain types, envelope codec, preferences.
//!
//! Public API surface:
//! - [`types`] — newtypes and the [`ScriptRecord`] domain struct
//! - [`envelope`] — XML envelope encode / decode / body injection
//! - [`prefs`] — preferences file load
//! - [`error`] — [`CodecError`], [`PrefsError`]

pub mod envelope;
pub mod error;
pub mod prefs;
pub mod types;

pub use error::{CodecError, PrefsError};
pub use types::{Parameter, Priority, ScriptId, ScriptName, ScriptRecord};
