//! Git plumbing.
//!
//! Every invocation targets an explicit repository root via `git -C <repo>`;
//! nothing here depends on the process working directory. One failed
//! invocation aborts the caller — there is no retry.

use std::path::Path;
use std::process::Output;

use crate::error::GitError;

/// How many stderr lines reach the user; git can print a heap.
const DIAGNOSTIC_LINES: usize = 5;

pub(crate) fn run(repo: &Path, args: &[&str], action: &str) -> Result<Output, GitError> {
    tracing::debug!(repo = %repo.display(), ?args, "running git");
    let output = std::process::Command::new("git")
        .arg("-C")
        .arg(repo)
        .args(args)
        .output()?;
    if !output.status.success() {
        return Err(GitError::Failed {
            action: action.to_string(),
            detail: truncate_stderr(&output.stderr),
        });
    }
    Ok(output)
}

fn truncate_stderr(stderr: &[u8]) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .take(DIAGNOSTIC_LINES)
        .collect::<Vec<_>>()
        .join("\n")
}

/// `git mv` a tracked file inside `repo`.
pub fn move_tracked(repo: &Path, src: &str, dst: &str) -> Result<(), GitError> {
    run(repo, &["mv", src, dst], "mv")?;
    Ok(())
}

/// `git rm` a tracked file inside `repo`.
pub fn remove_tracked(repo: &Path, name: &str) -> Result<(), GitError> {
    run(repo, &["rm", "--quiet", name], "rm")?;
    Ok(())
}

/// True when `git status --porcelain` reports nothing.
pub fn worktree_clean(repo: &Path) -> Result<bool, GitError> {
    let output = run(repo, &["status", "--porcelain"], "status")?;
    Ok(output.stdout.iter().all(u8::is_ascii_whitespace))
}

/// Stage and commit everything pending in `repo`.
///
/// A clean tree is a logged no-op (`Ok(None)`) rather than git's own
/// "nothing to commit" failure exit. Otherwise returns git's summary line.
pub fn commit_all(repo: &Path, message: &str) -> Result<Option<String>, GitError> {
    if worktree_clean(repo)? {
        tracing::info!(repo = %repo.display(), "nothing to commit");
        return Ok(None);
    }
    run(repo, &["add", "-A"], "add")?;
    let output = run(repo, &["commit", "-m", message], "commit")?;
    Ok(Some(String::from_utf8_lossy(&output.stdout).into_owned()))
}

/// `git push` the repo's current branch to its upstream.
pub fn push(repo: &Path) -> Result<String, GitError> {
    let output = run(repo, &["push"], "push")?;
    // git push reports on stderr even on success
    Ok(String::from_utf8_lossy(&output.stderr).into_owned())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
