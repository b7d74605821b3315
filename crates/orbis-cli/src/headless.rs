use anyhow::{Context, Result, bail};
use orbis_base::Guid;
use orbis_view::{
    BackendCall, ControllerConfig, InteractionMode, RecordingView, recording_controller,
};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

use crate::cli::ReplayArgs;
use crate::script::{CommandOutput, ViewerCommand, apply};

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub viewport: Guid,
    pub final_mode: InteractionMode,
    pub calls: Vec<BackendCall>,
    pub outputs: Vec<IndexedOutput>,
    pub errors: Vec<CommandError>,
}

#[derive(Debug, Serialize)]
pub struct IndexedOutput {
    pub index: usize,
    pub output: CommandOutput,
}

#[derive(Debug, Serialize)]
pub struct CommandError {
    pub index: usize,
    pub op: &'static str,
    pub message: String,
}

pub fn run_replay(args: ReplayArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ControllerConfig::default(),
    };
    let script = load_script(&args.script)?;
    let report = replay(&script, config, args.scale, args.degenerate, args.keep_going)?;

    let json = serde_json::to_string_pretty(&report).context("serialize replay report")?;
    match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output directory {}", parent.display()))?;
            }
            std::fs::write(path, json)
                .with_context(|| format!("write report {}", path.display()))?;
            info!(path = %path.display(), calls = report.calls.len(), "replay report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

pub fn replay(
    script: &[ViewerCommand],
    config: ControllerConfig,
    scale: f64,
    degenerate: bool,
    keep_going: bool,
) -> Result<ReplayReport> {
    if !scale.is_finite() || scale <= 0.0 {
        bail!("--scale must be > 0");
    }
    let (mut controller, log) = recording_controller(config, |log| {
        RecordingView::new(log)
            .with_scale(scale)
            .with_degenerate_mode(degenerate)
    })
    .context("invalid controller configuration")?;

    let mut outputs = Vec::new();
    let mut errors = Vec::new();
    for (index, command) in script.iter().enumerate() {
        match apply(&mut controller, command) {
            Ok(CommandOutput::None) => {}
            Ok(output) => outputs.push(IndexedOutput { index, output }),
            Err(err) if keep_going => {
                warn!(index, op = command.name(), %err, "command failed");
                errors.push(CommandError {
                    index,
                    op: command.name(),
                    message: err.to_string(),
                });
            }
            Err(err) => {
                return Err(err).with_context(|| format!("command #{index} ({})", command.name()));
            }
        }
    }

    info!(
        viewport = %controller.id(),
        commands = script.len(),
        calls = log.len(),
        "replay complete"
    );
    Ok(ReplayReport {
        viewport: controller.id(),
        final_mode: controller.mode(),
        calls: log.take(),
        outputs,
        errors,
    })
}

fn load_config(path: &Path) -> Result<ControllerConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config: ControllerConfig = serde_json::from_str(&text)
        .with_context(|| format!("parse config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
}

fn load_script(path: &Path) -> Result<Vec<ViewerCommand>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read script {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse script {}", path.display()))
}
