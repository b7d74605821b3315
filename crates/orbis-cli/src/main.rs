use anyhow::Result;
use clap::Parser;
use orbis_view::ProjectionPresets;
use tracing::info;

mod cli;
mod headless;
mod script;

fn main() -> Result<()> {
    init_tracing();
    let args = cli::CliArgs::parse();

    match args.command {
        cli::Command::Replay(args) => headless::run_replay(args),
        cli::Command::Presets => {
            list_presets();
            Ok(())
        }
    }
}

fn list_presets() {
    for (key, orientation) in ProjectionPresets::iter() {
        let dir = orientation.view_direction();
        println!(
            "{key:<12} {orientation:?} direction=({:.3}, {:.3}, {:.3})",
            dir.x, dir.y, dir.z
        );
    }
    info!(count = ProjectionPresets::iter().count(), "presets listed");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
