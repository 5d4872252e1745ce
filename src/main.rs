//! Rigg - load, validate and emit module bundler configuration.

#![allow(dead_code)]

mod cli;
mod config;
mod descriptor;
mod logger;
mod utils;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use descriptor::Descriptor;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to get current working directory")?;

    match &cli.command {
        Commands::Init { dry } => cli::init::new_config(&cwd, *dry),
        Commands::Check => cli::check::run(&load(&cli, &cwd)?),
        Commands::Emit { args } => cli::emit::run(&load(&cli, &cwd)?, args),
        Commands::Route { paths } => cli::route::run(&load(&cli, &cwd)?, paths),
    }
}

/// Build the descriptor once; every command borrows it from here.
fn load(cli: &Cli, cwd: &std::path::Path) -> Result<Descriptor> {
    config::load(&cli.config, cli.root.as_deref(), cwd)
}
