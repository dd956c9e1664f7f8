//! keystride command surface: argument parsing and the four user actions.

pub mod cli;
pub mod commands;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::commands::{cmd_export, cmd_optimize, cmd_retime, cmd_settings, resolve_settings};

/// Run a parsed command line and return the message to show the user.
pub fn run(cli: Cli) -> Result<String> {
    match cli.command {
        Commands::Retime {
            scene,
            base,
            retime,
            out,
        } => {
            let settings = resolve_settings(&base, &retime, &Default::default())?;
            cmd_retime(&scene, &settings, out.as_deref())
        }
        Commands::Export {
            scene,
            base,
            export,
        } => {
            let settings = resolve_settings(&base, &Default::default(), &export)?;
            cmd_export(&scene, &settings)
        }
        Commands::Optimize {
            scene,
            base,
            retime,
            export,
            out,
        } => {
            let settings = resolve_settings(&base, &retime, &export)?;
            cmd_optimize(&scene, &settings, out.as_deref())
        }
        Commands::Settings {
            base,
            retime,
            export,
            write,
        } => {
            let settings = resolve_settings(&base, &retime, &export)?;
            cmd_settings(&settings, write.as_deref())
        }
    }
}
