//! Scriptyard — Jamf Pro script sync CLI.
//!
//! # Usage
//!
//! ```text
//! scriptyard list [--json]
//! scriptyard down [-n] [-p | -d] [-m <msg>]        (alias: out)
//! scriptyard up [-p | -d] [-m <msg>]               (alias: in)
//! scriptyard rename <src> <dst> [-p | -d] [-m <msg>]   (alias: change)
//! scriptyard remove <name> [-p | -d] [-m <msg>]
//! scriptyard add [-f <name>] [-c <cat>] [-n <notes>] [-a|-b|-r] [-z] ...
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    add::AddArgs, down::DownArgs, list::ListArgs, remove::RemoveArgs, rename::RenameArgs,
    up::UpArgs,
};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "scriptyard",
    version,
    about = "Sync Jamf Pro scripts with a git-versioned working copy",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every script on the server.
    List(ListArgs),

    /// Download all scripts out of the server.
    #[command(alias = "out")]
    Down(DownArgs),

    /// Upload changed scripts and commit.
    #[command(alias = "in")]
    Up(UpArgs),

    /// Rename a script on the server and in both mirror directories.
    #[command(alias = "change")]
    Rename(RenameArgs),

    /// Remove a script from the server and both mirror directories.
    Remove(RemoveArgs),

    /// Add a new script to the server and the mirror.
    Add(AddArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::List(args) => args.run(),
        Commands::Down(args) => args.run(),
        Commands::Up(args) => args.run(),
        Commands::Rename(args) => args.run(),
        Commands::Remove(args) => args.run(),
        Commands::Add(args) => args.run(),
    }
}
