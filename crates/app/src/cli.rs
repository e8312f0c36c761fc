//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use planner_config::CanvasPreset;

#[derive(Parser, Debug)]
#[command(name = "mission-planner")]
#[command(version)]
#[command(about = "Annotate mission maps and manage the announcement board", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults are used if it does not exist)
    #[arg(short, long, global = true, default_value = "mission-planner.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a UI command script over the map and save the annotated canvas
    Annotate(AnnotateArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Read and manage the announcement board
    #[command(subcommand)]
    Announcements(AnnouncementsCommand),
}

#[derive(clap::Args, Debug)]
pub struct AnnotateArgs {
    /// Command script (JSON object with "commands", or a bare array)
    #[arg(short, long)]
    pub script: PathBuf,

    /// Where to write the annotated canvas as PNG
    #[arg(short, long)]
    pub out: PathBuf,

    /// Base map image (overrides the config)
    #[arg(short, long)]
    pub map: Option<PathBuf>,

    /// Previously saved canvas to continue from (overrides the config)
    #[arg(long)]
    pub canvas: Option<PathBuf>,

    /// Canvas layout (overrides the configured dimensions)
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Write every engine-to-UI message here as JSON lines
    #[arg(long)]
    pub events: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a default configuration file
    Init {
        /// Target path (defaults to --config)
        path: Option<PathBuf>,

        /// Canvas layout to start from
        #[arg(long, value_enum, default_value = "compact")]
        preset: PresetArg,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

#[derive(Subcommand, Debug)]
pub enum AnnouncementsCommand {
    /// Show the board and every stored announcement
    List,

    /// Post a new announcement
    Post {
        /// Admin code
        #[arg(long)]
        code: Option<String>,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        details: String,

        /// Status tag (INFO, ALERT, WARNING, URGENT, CRITICAL, MAINTENANCE,
        /// EXERCISE, WEATHER, SECURITY, ROUTINE, UPDATE, COMPLETED)
        #[arg(long, default_value = "INFO")]
        status: String,

        /// Sender
        #[arg(long = "by")]
        by_who: String,
    },

    /// Delete announcements by id
    Delete {
        /// Admin code
        #[arg(long)]
        code: Option<String>,

        /// Ids to delete, as shown by `list`
        ids: Vec<String>,
    },

    /// Delete every announcement
    DeleteAll {
        /// Admin code
        #[arg(long)]
        code: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresetArg {
    /// 595x451
    Compact,
    /// 635x491
    Wide,
}

impl From<PresetArg> for CanvasPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Compact => CanvasPreset::Compact,
            PresetArg::Wide => CanvasPreset::Wide,
        }
    }
}
