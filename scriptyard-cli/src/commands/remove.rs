//! `scriptyard remove <name>` — delete from the server and the mirror.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use scriptyard_core::types::ScriptName;
use scriptyard_sync::ops;

use super::{PublishFlags, Session};

/// Arguments for `scriptyard remove`.
#[derive(Args, Debug)]
pub struct RemoveArgs {
    /// Name of the script to remove.
    pub name: String,

    #[command(flatten)]
    pub publish: PublishFlags,
}

impl RemoveArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::open()?;
        let opts = self
            .publish
            .to_opts(format!("scriptyard remove {}", self.name));

        let name = ScriptName::from(self.name.as_str());
        let id = ops::remove(&session.client, &session.mirror, &name, &opts)
            .with_context(|| format!("remove '{name}' failed"))?;

        println!("{} removed '{name}' (id {id})", "✓".green());
        Ok(())
    }
}
