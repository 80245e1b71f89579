//! Change-set resolver.
//!
//! The upload change-set is whatever `git diff --name-only HEAD` reports in
//! the script-body directory: tracked files whose working-tree content
//! differs from the last commit, staged or not. Computed fresh for every
//! upload — never cached.

use std::path::Path;

use crate::error::GitError;
use crate::git;

/// Filenames with pending edits in `repo`, in git's own order.
///
/// An empty vec is the "nothing to do" answer, never an error.
pub fn pending_changes(repo: &Path) -> Result<Vec<String>, GitError> {
    let output = git::run(repo, &["diff", "--name-only", "HEAD"], "diff")?;
    let files: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();
    tracing::debug!(repo = %repo.display(), count = files.len(), "pending changes");
    Ok(files)
}
