use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "orbis")]
#[command(about = "Orbis viewport controller: headless replay of viewer input")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Replays a JSON script of viewer commands and prints the backend calls it produced.
    Replay(ReplayArgs),
    /// Lists the projection presets and the orientation each one issues.
    Presets,
}

#[derive(Args)]
pub struct ReplayArgs {
    #[arg(long)]
    pub script: PathBuf,
    /// Controller configuration as JSON; missing fields keep their defaults.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Write the report here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Zoom factor the simulated camera starts at.
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,
    /// Start with degenerate mode already on.
    #[arg(long)]
    pub degenerate: bool,
    /// Record failing commands in the report and continue.
    #[arg(long)]
    pub keep_going: bool,
}
