//! Commit/publish controller.
//!
//! Finalizes a subcommand by committing the script-body directory and,
//! optionally, pushing both working copies. Push order is fixed: bodies
//! first, then envelopes. A push failure leaves the other directory
//! unpushed — there is no cross-directory atomicity and no rollback.

use crate::error::GitError;
use crate::git;
use crate::mirror::Mirror;

/// What to do with local history once an operation's file work is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOpts {
    pub commit: bool,
    pub push: bool,
    pub message: String,
}

impl PublishOpts {
    /// Leave the working copies alone entirely.
    pub fn keep_local() -> Self {
        PublishOpts {
            commit: false,
            push: false,
            message: String::new(),
        }
    }
}

/// Commit pending changes in the body mirror, then push both mirrors if
/// requested. No-op when commit was not requested.
pub fn finalize(mirror: &Mirror, opts: &PublishOpts) -> Result<(), GitError> {
    if !opts.commit {
        tracing::debug!("commit not requested");
        return Ok(());
    }

    match git::commit_all(mirror.sh_dir(), &opts.message)? {
        Some(summary) => tracing::info!(%summary, "committed scripts directory"),
        None => tracing::info!("scripts directory already clean"),
    }

    if opts.push {
        let report = git::push(mirror.sh_dir())?;
        tracing::info!(%report, "pushed scripts directory");
        let report = git::push(mirror.xml_dir())?;
        tracing::info!(%report, "pushed XML directory");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn git_available() -> bool {
        std::process::Command::new("git")
            .arg("--version")
            .output()
            .is_ok()
    }

    fn init_repo(dir: &Path) {
        for args in [
            vec!["init", "-q"],
            vec!["config", "user.email", "test@example.com"],
            vec!["config", "user.name", "Test"],
        ] {
            git::run(dir, &args, "setup").expect("git setup");
        }
    }

    fn commit_count(repo: &Path) -> usize {
        let out = git::run(repo, &["rev-list", "--count", "HEAD"], "rev-list").unwrap();
        String::from_utf8_lossy(&out.stdout).trim().parse().unwrap()
    }

    #[test]
    fn finalize_without_commit_touches_nothing() {
        let xml = TempDir::new().unwrap();
        let sh = TempDir::new().unwrap();
        // not even git repositories — proves no git command runs
        let mirror = Mirror::new(xml.path().to_path_buf(), sh.path().to_path_buf()).unwrap();
        finalize(&mirror, &PublishOpts::keep_local()).expect("no-op finalize");
    }

    #[test]
    fn finalize_commits_only_the_body_mirror() {
        if !git_available() {
            return;
        }
        let xml = TempDir::new().unwrap();
        let sh = TempDir::new().unwrap();
        init_repo(xml.path());
        init_repo(sh.path());
        std::fs::write(sh.path().join("a.sh"), "body\n").unwrap();
        std::fs::write(xml.path().join("a.sh"), "<script/>\n").unwrap();

        let mirror = Mirror::new(xml.path().to_path_buf(), sh.path().to_path_buf()).unwrap();
        let opts = PublishOpts {
            commit: true,
            push: false,
            message: "sync".to_string(),
        };
        finalize(&mirror, &opts).expect("finalize");

        assert_eq!(commit_count(sh.path()), 1);
        // the XML mirror's history is untouched (no commits at all yet)
        assert!(git::run(xml.path(), &["rev-list", "--count", "HEAD"], "rev-list").is_err());
    }

    #[test]
    fn push_failure_in_body_mirror_aborts_before_xml_push() {
        if !git_available() {
            return;
        }
        let xml = TempDir::new().unwrap();
        let sh = TempDir::new().unwrap();
        init_repo(xml.path());
        init_repo(sh.path());
        std::fs::write(sh.path().join("a.sh"), "body\n").unwrap();

        let mirror = Mirror::new(xml.path().to_path_buf(), sh.path().to_path_buf()).unwrap();
        let opts = PublishOpts {
            commit: true,
            push: true,
            message: "sync".to_string(),
        };
        // no upstream configured anywhere: the body push fails first
        let err = finalize(&mirror, &opts).unwrap_err();
        assert!(matches!(err, GitError::Failed { .. }));
        // the commit itself landed before the failed push
        assert_eq!(commit_count(sh.path()), 1);
    }
}
