//! `scriptyard up` — upload locally edited scripts.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use scriptyard_sync::ops;

use super::{PublishFlags, Session};

/// Arguments for `scriptyard up` (alias `in`).
#[derive(Args, Debug)]
pub struct UpArgs {
    #[command(flatten)]
    pub publish: PublishFlags,
}

impl UpArgs {
    pub fn run(self) -> Result<()> {
        let session = Session::open()?;
        let opts = self.publish.to_opts("scriptyard up".to_string());

        let uploaded = ops::upload_changed(&session.client, &session.mirror, &opts)
            .context("upload failed")?;

        for name in &uploaded {
            println!("  ↑  {name}");
        }
        println!("{} uploaded {} scripts", "✓".green(), uploaded.len());
        Ok(())
    }
}
