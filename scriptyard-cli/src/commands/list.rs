//! `scriptyard list` — one line per script, server order.

use anyhow::{Context, Result};
use clap::Args;

use scriptyard_jamf::ScriptsRemote;

use super::Session;

/// Arguments for `scriptyard list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::open()?;
        let summaries = session
            .client
            .list_summaries()
            .context("failed to list scripts")?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&summaries).context("failed to serialize listing")?
            );
            return Ok(());
        }
        for summary in &summaries {
            println!("{}:\t{}", summary.id, summary.name);
        }
        Ok(())
    }
}
