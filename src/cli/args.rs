//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Load, validate and emit module bundler configuration
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path, searched upward from the current directory
    #[arg(short = 'C', long, default_value = "rigg.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Base directory for relative paths (default: the config file's directory)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Create a default rigg.toml in the current directory
    #[command(visible_alias = "i")]
    Init {
        /// Print the template instead of writing it
        #[arg(short, long)]
        dry: bool,
    },

    /// Validate the configuration and print a summary
    #[command(visible_alias = "c")]
    Check,

    /// Print the resolved configuration in the bundler's JSON format
    #[command(visible_alias = "e")]
    Emit {
        #[command(flatten)]
        args: EmitArgs,
    },

    /// Show which rule governs each path
    #[command(visible_alias = "r")]
    Route {
        /// File paths to route
        #[arg(required = true, value_hint = clap::ValueHint::AnyPath)]
        paths: Vec<PathBuf>,
    },
}

/// Emit command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct EmitArgs {
    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Write output to file instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,
}

#[allow(unused)]
impl Cli {
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Commands::Init { .. })
    }
}
