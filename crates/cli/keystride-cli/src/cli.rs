use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use keystride_core::Preset;

#[derive(Parser, Debug)]
#[command(name = "keystride", version, about = "Retime keyframes and bake-export animation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evenly redistribute keyframes and normalize them to vector bezier
    Retime {
        scene: PathBuf,
        #[command(flatten)]
        base: SettingsArgs,
        #[command(flatten)]
        retime: RetimeArgs,
        /// Write the retimed scene here instead of overwriting the input
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Bake the scene animation to an interchange file
    Export {
        scene: PathBuf,
        #[command(flatten)]
        base: SettingsArgs,
        #[command(flatten)]
        export: ExportArgs,
    },
    /// Retime, save the scene, then export
    Optimize {
        scene: PathBuf,
        #[command(flatten)]
        base: SettingsArgs,
        #[command(flatten)]
        retime: RetimeArgs,
        #[command(flatten)]
        export: ExportArgs,
        /// Write the retimed scene here instead of overwriting the input
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print resolved settings as JSON, or write them to a file
    Settings {
        #[command(flatten)]
        base: SettingsArgs,
        #[command(flatten)]
        retime: RetimeArgs,
        #[command(flatten)]
        export: ExportArgs,
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    /// start 1, spacing 0.5, 15 fps
    Kh2,
    /// start 1, spacing 2, 60 fps
    Smooth,
}

impl From<PresetArg> for Preset {
    fn from(p: PresetArg) -> Self {
        match p {
            PresetArg::Kh2 => Preset::Kh2,
            PresetArg::Smooth => Preset::Smooth,
        }
    }
}

/// Where the base settings come from; defaults to the kh2 preset.
#[derive(Args, Debug, Default, Clone)]
pub struct SettingsArgs {
    /// Settings JSON to start from
    #[arg(long)]
    pub settings: Option<PathBuf>,
    #[arg(long, value_enum, conflicts_with = "settings")]
    pub preset: Option<PresetArg>,
}

/// Overrides applied on top of the base settings.
#[derive(Args, Debug, Default, Clone)]
pub struct RetimeArgs {
    /// Time of the first keyframe
    #[arg(long)]
    pub start: Option<f64>,
    /// Frames between keyframes
    #[arg(long)]
    pub spacing: Option<f64>,
    /// New scene frame rate
    #[arg(long)]
    pub fps: Option<u32>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ExportArgs {
    /// Baked output file
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Bake sampling step in frames
    #[arg(long)]
    pub step: Option<f64>,
}
