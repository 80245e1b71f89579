//! Subcommand implementations.

pub mod add;
pub mod down;
pub mod list;
pub mod remove;
pub mod rename;
pub mod up;

use anyhow::{Context, Result};
use clap::Args;

use scriptyard_core::prefs;
use scriptyard_jamf::JamfClient;
use scriptyard_sync::{Mirror, PublishOpts};

/// Everything one invocation needs: the remote client and the mirror handle,
/// built fresh from preferences. Nothing global, nothing cached.
pub(crate) struct Session {
    pub client: JamfClient,
    pub mirror: Mirror,
}

impl Session {
    pub fn open() -> Result<Self> {
        let prefs = prefs::load().context("failed to load preferences")?;
        tracing::debug!(server = %prefs.server_url, "preferences loaded");
        let client = JamfClient::new(&prefs.server_url, &prefs.username, &prefs.password);
        let mirror = Mirror::new(prefs.xml_dir, prefs.sh_dir)
            .context("mirror directories are not usable")?;
        Ok(Session { client, mirror })
    }
}

/// Commit/push flags shared by every mutating subcommand.
#[derive(Args, Debug)]
pub(crate) struct PublishFlags {
    /// Do a git push after commit.
    #[arg(short, long)]
    pub push: bool,

    /// Don't do a commit.
    #[arg(short = 'd', long, conflicts_with = "push")]
    pub dont_commit: bool,

    /// Set commit message.
    #[arg(short, long)]
    pub message: Option<String>,
}

impl PublishFlags {
    pub fn to_opts(&self, default_message: String) -> PublishOpts {
        PublishOpts {
            commit: !self.dont_commit,
            push: self.push,
            message: self.message.clone().unwrap_or(default_message),
        }
    }
}
