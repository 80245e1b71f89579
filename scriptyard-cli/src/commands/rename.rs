//! `scriptyard rename <src> <dst>` — rename on the server and in the mirror.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use scriptyard_core::types::ScriptName;
use scriptyard_sync::ops;

use super::{PublishFlags, Session};

/// Arguments for `scriptyard rename` (alias `change`).
#[derive(Args, Debug)]
pub struct RenameArgs {
    /// Current name of the script.
    pub src: String,

    /// New name of the script.
    pub dst: String,

    #[command(flatten)]
    pub publish: PublishFlags,
}

impl RenameArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::open()?;
        let opts = self
            .publish
            .to_opts(format!("scriptyard rename {} {}", self.src, self.dst));

        let src = ScriptName::from(self.src.as_str());
        let dst = ScriptName::from(self.dst.as_str());
        ops::rename(&session.client, &session.mirror, &src, &dst, &opts)
            .with_context(|| format!("rename '{src}' -> '{dst}' failed"))?;

        println!("{} renamed '{src}' to '{dst}'", "✓".green());
        Ok(())
    }
}
