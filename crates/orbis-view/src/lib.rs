pub mod viewer;

pub use orbis_base::{Error, Guid, Result, Rgb, Rgb8};
pub use viewer::*;

/// Controller wired to the in-memory recording backends.
pub type RecordingController = ViewportController<RecordingView, RecordingScene>;

/// Builds a recording controller whose view and scene share one call log.
pub fn recording_controller(
    config: ControllerConfig,
    view: impl FnOnce(CallLog) -> RecordingView,
) -> Result<(RecordingController, CallLog)> {
    let log = CallLog::new();
    let controller = ViewportController::new(config)?
        .with_view(view(log.clone()))
        .with_scene(RecordingScene::new(log.clone()));
    Ok((controller, log))
}
