//! cuecast: a stdin-driven audio cue engine for an AI coding assistant's
//! hook protocol.
//!
//! The default invocation (no subcommand) reads one hook event JSON
//! document from stdin and plays at most one sound. `install`/`uninstall`
//! manage the host's hook registration and are the one place a failure is
//! allowed to produce a non-zero exit.

mod commands;
mod logging;
mod orchestrator;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::orchestrator::Overrides;

#[derive(Parser)]
#[command(name = "cuecast")]
#[command(author, version, about = "Audio cue engine for AI coding assistant hooks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Run the pipeline without playing any audio.
    #[arg(long)]
    silent: bool,

    /// Override the configured output volume (0.0..=1.0).
    #[arg(long)]
    volume: Option<f32>,

    /// Path to the config file, overriding the XDG default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Soundpack id (resolved against soundpack_paths) or an absolute
    /// JSON soundpack document path.
    #[arg(long)]
    soundpack: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the cuecast hook command in the host's settings JSON.
    Install(commands::install::InstallArgs),
    /// Remove cuecast's hook entries from the host's settings JSON.
    Uninstall(commands::uninstall::UninstallArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Install(args)) => return commands::install::run(args),
        Some(Commands::Uninstall(args)) => return commands::uninstall::run(args),
        None => {}
    }

    let config = cuecast_config::load(cli.config.as_deref()).unwrap_or_else(|err| {
        eprintln!("warning: {err}, falling back to defaults");
        cuecast_config::Config::default()
    });

    logging::init(&config);

    let overrides = Overrides {
        silent: cli.silent,
        volume: cli.volume,
        soundpack: cli.soundpack,
    };

    let code = orchestrator::run(config, overrides);
    std::process::exit(code);
}
