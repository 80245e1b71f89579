//! Domain types for the scriptyard sync model.
//!
//! A [`ScriptRecord`] carries every field of the Jamf script envelope so that
//! a decode → modify → encode cycle preserves metadata the orchestrator does
//! not intentionally touch.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Server-assigned numeric identity of a script. `0` means "not yet created".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScriptId(pub u32);

impl ScriptId {
    /// Sentinel the server treats as "assign me a real id on create".
    pub const UNASSIGNED: ScriptId = ScriptId(0);

    pub fn is_unassigned(&self) -> bool {
        self.0 == 0
    }
}

impl Default for ScriptId {
    fn default() -> Self {
        ScriptId::UNASSIGNED
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for ScriptId {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

/// A script's unique name. Doubles as the filename in both mirror directories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct ScriptName(pub String);

impl fmt::Display for ScriptName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ScriptName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ScriptName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Execution-order hint understood by the server. Pass-through beyond the
/// three wire spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Before,
    After,
    AtReboot,
}

impl Priority {
    /// The exact text the server expects in the envelope.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Priority::Before => "Before",
            Priority::After => "After",
            Priority::AtReboot => "At Reboot",
        }
    }

    /// Parse the envelope text. Empty means "no priority set".
    pub fn parse(text: &str) -> Result<Option<Priority>, String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "before" => Ok(Some(Priority::Before)),
            "after" => Ok(Some(Priority::After)),
            "at reboot" | "reboot" => Ok(Some(Priority::AtReboot)),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Lowest parameter slot the server exposes to scripts (1–3 are reserved).
pub const FIRST_PARAMETER_SLOT: u8 = 4;
/// Highest parameter slot the envelope can carry.
pub const LAST_PARAMETER_SLOT: u8 = 11;

/// One named parameter placeholder, bound to its envelope slot
/// (`parameter4` … `parameter11`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub slot: u8,
    pub prompt: String,
}

// ---------------------------------------------------------------------------
// ScriptRecord
// ---------------------------------------------------------------------------

/// One script resource as the server models it.
///
/// `script_contents` and `script_contents_encoded` are mutually exclusive on
/// upload; [`crate::envelope::inject_body`] maintains that invariant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ScriptRecord {
    pub id: ScriptId,
    pub name: ScriptName,
    pub category: String,
    pub filename: String,
    pub info: String,
    pub notes: String,
    pub priority: Option<Priority>,
    pub parameters: Vec<Parameter>,
    pub os_requirements: String,
    pub script_contents: String,
    pub script_contents_encoded: String,
}

impl ScriptRecord {
    /// A blank record for a script that does not yet exist on the server.
    ///
    /// Identity is the unassigned sentinel and the body is a one-line header
    /// naming the file, which is what the server stores for a new script
    /// until the first real upload.
    pub fn blank(name: impl Into<ScriptName>) -> Self {
        let name = name.into();
        ScriptRecord {
            filename: name.0.clone(),
            script_contents: format!("# {}\n", name.0),
            name,
            ..ScriptRecord::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
