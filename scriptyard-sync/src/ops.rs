//! Per-subcommand orchestration.
//!
//! Each operation is a linear pipeline over three collaborators: the remote
//! (behind [`ScriptsRemote`]), the local [`Mirror`], and git. The first
//! failing step aborts the whole operation; whatever partial state exists at
//! that instant stays — in particular, a half-done rename leaves the two
//! mirror directories inconsistent with each other. That window is accepted
//! and documented, not hidden.

use scriptyard_core::envelope;
use scriptyard_core::types::{Parameter, Priority, ScriptId, ScriptName, ScriptRecord};
use scriptyard_jamf::ScriptsRemote;

use crate::changeset;
use crate::error::SyncError;
use crate::git;
use crate::mirror::{Mirror, WriteOutcome};
use crate::publish::{self, PublishOpts};

// ---------------------------------------------------------------------------
// download-all
// ---------------------------------------------------------------------------

/// What happened to one script during `download_all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedScript {
    pub name: ScriptName,
    pub envelope: WriteOutcome,
    pub body: WriteOutcome,
}

/// Pull every script off the server into the mirror.
///
/// With `force` off, files that already exist locally are skipped — re-runs
/// are no-ops that never clobber local edits.
pub fn download_all(
    remote: &dyn ScriptsRemote,
    mirror: &Mirror,
    force: bool,
    opts: &PublishOpts,
) -> Result<Vec<DownloadedScript>, SyncError> {
    let summaries = remote.list_summaries()?;
    let mut downloads = Vec::with_capacity(summaries.len());
    for summary in summaries {
        let raw = remote.fetch_envelope(summary.id)?;
        let record = envelope::decode(&raw)?;
        let name = ScriptName::from(summary.name);
        let envelope_outcome = mirror.write_envelope(&name, &raw, force)?;
        let body_outcome = mirror.write_body(&name, envelope::extract_body(&record), force)?;
        tracing::info!(script = %name, id = %summary.id, "downloaded");
        downloads.push(DownloadedScript {
            name,
            envelope: envelope_outcome,
            body: body_outcome,
        });
    }
    publish::finalize(mirror, opts)?;
    Ok(downloads)
}

// ---------------------------------------------------------------------------
// upload-changed
// ---------------------------------------------------------------------------

/// Push every locally edited script body back to the server.
///
/// The change-set is computed fresh from the body mirror's working tree; an
/// empty change-set is [`SyncError::NoPendingChanges`] and the remote is
/// never contacted.
pub fn upload_changed(
    remote: &dyn ScriptsRemote,
    mirror: &Mirror,
    opts: &PublishOpts,
) -> Result<Vec<ScriptName>, SyncError> {
    let pending = changeset::pending_changes(mirror.sh_dir())?;
    if pending.is_empty() {
        return Err(SyncError::NoPendingChanges);
    }

    let mut uploaded = Vec::with_capacity(pending.len());
    for filename in pending {
        let name = ScriptName::from(filename);
        let body = mirror.read_body(&name)?;
        let raw = mirror.read_envelope(&name)?;
        let mut record = envelope::decode(&raw)?;
        envelope::inject_body(&mut record, &body);
        let updated = envelope::encode(&record)?;
        remote.create_or_replace(record.id, &updated)?;
        mirror.write_envelope(&name, &updated, true)?;
        tracing::info!(script = %name, id = %record.id, "uploaded");
        uploaded.push(name);
    }
    publish::finalize(mirror, opts)?;
    Ok(uploaded)
}

// ---------------------------------------------------------------------------
// rename
// ---------------------------------------------------------------------------

/// Rename a script on the server and in both mirror directories.
///
/// The remote update lands first; if either local `git mv` then fails the
/// operation aborts before any commit, leaving the directories out of step
/// with each other (and with the server) until the user intervenes.
pub fn rename(
    remote: &dyn ScriptsRemote,
    mirror: &Mirror,
    src: &ScriptName,
    dst: &ScriptName,
    opts: &PublishOpts,
) -> Result<(), SyncError> {
    let raw = mirror.read_envelope(src)?;
    let mut record = envelope::decode(&raw)?;
    record.name = dst.clone();
    record.script_contents_encoded = String::new();
    let updated = envelope::encode(&record)?;
    remote.create_or_replace(record.id, &updated)?;

    git::move_tracked(mirror.xml_dir(), &src.0, &dst.0)?;
    git::move_tracked(mirror.sh_dir(), &src.0, &dst.0)?;
    // the moved envelope still carries the old name inside; refresh it
    mirror.write_envelope(dst, &updated, true)?;
    tracing::info!(from = %src, to = %dst, id = %record.id, "renamed");

    publish::finalize(mirror, opts)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// remove
// ---------------------------------------------------------------------------

/// Delete a script from the server and drop it from both mirrors.
pub fn remove(
    remote: &dyn ScriptsRemote,
    mirror: &Mirror,
    name: &ScriptName,
    opts: &PublishOpts,
) -> Result<ScriptId, SyncError> {
    let raw = mirror.read_envelope(name)?;
    let record = envelope::decode(&raw)?;
    remote.delete(record.id)?;

    git::remove_tracked(mirror.xml_dir(), &name.0)?;
    git::remove_tracked(mirror.sh_dir(), &name.0)?;
    tracing::info!(script = %name, id = %record.id, "removed");

    publish::finalize(mirror, opts)?;
    Ok(record.id)
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

/// Collected fields for a script that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScript {
    pub name: ScriptName,
    pub category: String,
    pub notes: String,
    pub priority: Option<Priority>,
    pub parameters: Vec<Parameter>,
}

/// Create a script on the server and seed the mirror with it.
///
/// The create goes up at the unassigned-id sentinel; the server's reply
/// carries the real id, which is folded into the record before the local
/// envelope is written. Returns the assigned id.
pub fn add(
    remote: &dyn ScriptsRemote,
    mirror: &Mirror,
    draft: NewScript,
    opts: &PublishOpts,
) -> Result<ScriptId, SyncError> {
    let mut record = ScriptRecord::blank(draft.name.clone());
    record.category = draft.category;
    record.notes = draft.notes;
    record.priority = draft.priority;
    record.parameters = draft.parameters;

    let fresh = envelope::encode(&record)?;
    let reply = remote.create_or_replace(ScriptId::UNASSIGNED, &fresh)?;
    let assigned = envelope::parse_assigned_id(&reply)?;
    record.id = assigned;

    let updated = envelope::encode(&record)?;
    mirror.write_envelope(&draft.name, &updated, true)?;
    mirror.write_body(&draft.name, &record.script_contents, true)?;
    tracing::info!(script = %draft.name, id = %assigned, "created");

    publish::finalize(mirror, opts)?;
    Ok(assigned)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
