//! `scriptyard add` — create a new script on the server.
//!
//! Fields not supplied as flags are prompted for interactively; parameter
//! prompts stop at the first empty answer (or are skipped entirely with
//! `--zero`).

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::Input;

use scriptyard_core::types::{
    Parameter, Priority, ScriptName, FIRST_PARAMETER_SLOT, LAST_PARAMETER_SLOT,
};
use scriptyard_sync::{ops, NewScript};

use super::{PublishFlags, Session};

/// Arguments for `scriptyard add`.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Name of the new script.
    #[arg(short, long)]
    pub filename: Option<String>,

    /// Category of the script.
    #[arg(short, long)]
    pub category: Option<String>,

    /// Note about the script.
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Run the script with priority 'after'.
    #[arg(short, long, group = "priority")]
    pub after: bool,

    /// Run the script with priority 'before'.
    #[arg(short, long, group = "priority")]
    pub before: bool,

    /// Run the script at reboot.
    #[arg(short, long, group = "priority")]
    pub reboot: bool,

    /// Zero parameters for the script (skip the parameter prompts).
    #[arg(short, long)]
    pub zero: bool,

    #[command(flatten)]
    pub publish: PublishFlags,
}

impl AddArgs {
    pub fn run(self) -> Result<()> {
        let filename = prompt_unless("Filename", self.filename)?;
        let category = prompt_unless("Category", self.category)?;
        let notes = prompt_unless("Notes", self.notes)?;
        let priority = if self.before {
            Some(Priority::Before)
        } else if self.after {
            Some(Priority::After)
        } else if self.reboot {
            Some(Priority::AtReboot)
        } else {
            None
        };
        let parameters = if self.zero {
            Vec::new()
        } else {
            prompt_parameters()?
        };

        let session = Session::open()?;
        let opts = self
            .publish
            .to_opts(format!("scriptyard add {filename}"));

        let draft = NewScript {
            name: ScriptName::from(filename.as_str()),
            category,
            notes,
            priority,
            parameters,
        };
        let id = ops::add(&session.client, &session.mirror, draft, &opts)
            .with_context(|| format!("add '{filename}' failed"))?;

        println!("{} created '{filename}' with id {id}", "✓".green());
        Ok(())
    }
}

fn prompt_unless(label: &str, flag: Option<String>) -> Result<String> {
    match flag {
        Some(value) => Ok(value),
        None => Ok(Input::<String>::new()
            .with_prompt(label)
            .allow_empty(true)
            .interact_text()?),
    }
}

/// One prompt per slot, stopping at the first empty answer.
fn prompt_parameters() -> Result<Vec<Parameter>> {
    let mut parameters = Vec::new();
    for slot in FIRST_PARAMETER_SLOT..=LAST_PARAMETER_SLOT {
        let prompt: String = Input::new()
            .with_prompt(format!("Prompt {slot}"))
            .allow_empty(true)
            .interact_text()?;
        if prompt.is_empty() {
            break;
        }
        parameters.push(Parameter { slot, prompt });
    }
    Ok(parameters)
}
