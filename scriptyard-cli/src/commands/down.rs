//! `scriptyard down` — pull every script into the mirror.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use scriptyard_sync::{ops, WriteOutcome};

use super::{PublishFlags, Session};

/// Arguments for `scriptyard down` (alias `out`).
#[derive(Args, Debug)]
pub struct DownArgs {
    /// Don't force overwrite of existing script or XML files.
    #[arg(short = 'n', long)]
    pub no_force: bool,

    #[command(flatten)]
    pub publish: PublishFlags,
}

impl DownArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::open()?;
        let opts = self.publish.to_opts("scriptyard down".to_string());

        let downloads = ops::download_all(&session.client, &session.mirror, !self.no_force, &opts)
            .context("download failed")?;

        let written = downloads
            .iter()
            .filter(|d| matches!(d.body, WriteOutcome::Written { .. }))
            .count();
        for download in &downloads {
            let marker = match download.body {
                WriteOutcome::Written { .. } => "✎",
                WriteOutcome::Skipped { .. } => "·",
            };
            println!("  {marker}  {}", download.name);
        }
        println!(
            "{} downloaded {} scripts ({} written, {} kept)",
            "✓".green(),
            downloads.len(),
            written,
            downloads.len() - written,
        );
        Ok(())
    }
}
