use orbis_base::{Result, Rgb8};
use orbis_view::{
    ContextMenu, Point2, PointerEvent, Rect, SceneBackend, ViewBackend, ViewportController,
};
use serde::{Deserialize, Serialize};

/// One step of a replay script.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ViewerCommand {
    Pointer { event: PointerEvent },
    StartRotation { x: i32, y: i32 },
    UpdateRotation { x: i32, y: i32 },
    EndRotation,
    AbortGesture,
    Pan { dx: i32, dy: i32 },
    Zoom { from: Point2, to: Point2 },
    ActivateGlobalPanning,
    SetCenter { x: i32, y: i32 },
    FitAll,
    WindowFit { rect: Rect },
    ActivateWindowFit,
    SetProjection { key: String },
    SetDegenerateMode { on: bool },
    ResetView,
    GetBackground,
    SetBackground { color: Rgb8 },
}

impl ViewerCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pointer { .. } => "pointer",
            Self::StartRotation { .. } => "start_rotation",
            Self::UpdateRotation { .. } => "update_rotation",
            Self::EndRotation => "end_rotation",
            Self::AbortGesture => "abort_gesture",
            Self::Pan { .. } => "pan",
            Self::Zoom { .. } => "zoom",
            Self::ActivateGlobalPanning => "activate_global_panning",
            Self::SetCenter { .. } => "set_center",
            Self::FitAll => "fit_all",
            Self::WindowFit { .. } => "window_fit",
            Self::ActivateWindowFit => "activate_window_fit",
            Self::SetProjection { .. } => "set_projection",
            Self::SetDegenerateMode { .. } => "set_degenerate_mode",
            Self::ResetView => "reset_view",
            Self::GetBackground => "get_background",
            Self::SetBackground { .. } => "set_background",
        }
    }
}

/// What a command hands back to the UI besides backend calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutput {
    None,
    ContextMenu { menu: ContextMenu },
    Background { color: Rgb8 },
}

pub fn apply<V, S>(
    controller: &mut ViewportController<V, S>,
    command: &ViewerCommand,
) -> Result<CommandOutput>
where
    V: ViewBackend,
    S: SceneBackend,
{
    match command {
        ViewerCommand::Pointer { event } => {
            return Ok(controller
                .handle_pointer(*event)?
                .map_or(CommandOutput::None, |menu| CommandOutput::ContextMenu { menu }));
        }
        ViewerCommand::StartRotation { x, y } => controller.start_rotation(*x, *y)?,
        ViewerCommand::UpdateRotation { x, y } => controller.update_rotation(*x, *y)?,
        ViewerCommand::EndRotation => controller.end_rotation()?,
        ViewerCommand::AbortGesture => controller.abort_gesture()?,
        ViewerCommand::Pan { dx, dy } => controller.pan(*dx, *dy)?,
        ViewerCommand::Zoom { from, to } => controller.zoom(*from, *to)?,
        ViewerCommand::ActivateGlobalPanning => controller.activate_global_panning()?,
        ViewerCommand::SetCenter { x, y } => controller.set_center(*x, *y)?,
        ViewerCommand::FitAll => controller.fit_all()?,
        ViewerCommand::WindowFit { rect } => controller.window_fit(*rect)?,
        ViewerCommand::ActivateWindowFit => controller.activate_window_fit()?,
        ViewerCommand::SetProjection { key } => controller.set_projection_named(key)?,
        ViewerCommand::SetDegenerateMode { on } => controller.set_degenerate_mode(*on)?,
        ViewerCommand::ResetView => controller.reset_view()?,
        ViewerCommand::GetBackground => {
            let color = controller.background_color()?;
            return Ok(CommandOutput::Background { color });
        }
        ViewerCommand::SetBackground { color } => controller.set_background_color(*color)?,
    }
    Ok(CommandOutput::None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbis_base::Error;
    use orbis_view::{
        BackendCall, ContextMenuKind, ControllerConfig, PickTarget, RecordingView, pos2,
        recording_controller,
    };

    fn parse(text: &str) -> Vec<ViewerCommand> {
        serde_json::from_str(text).expect("script parses")
    }

    #[test]
    fn script_drives_a_rectangle_selection() -> Result<()> {
        let script = parse(
            r#"[
                {"op": "pointer", "event": {"kind": "pressed", "button": "primary", "pos": {"x": 10, "y": 10}}},
                {"op": "pointer", "event": {"kind": "moved", "pos": {"x": 50, "y": 80}}},
                {"op": "pointer", "event": {"kind": "released", "button": "primary", "pos": {"x": 50, "y": 80}, "modifiers": {"shift": true}}}
            ]"#,
        );
        let (mut controller, log) =
            recording_controller(ControllerConfig::default(), RecordingView::new)?;
        for command in &script {
            assert_eq!(apply(&mut controller, command)?, CommandOutput::None);
        }
        assert_eq!(
            log.calls().last(),
            Some(&BackendCall::ShiftSelect {
                target: PickTarget::Rect {
                    rect: Rect::from_points(pos2(10, 10), pos2(50, 80))
                }
            })
        );
        Ok(())
    }

    #[test]
    fn outputs_are_reported() -> Result<()> {
        let script = parse(
            r#"[
                {"op": "set_background", "color": {"r": 10, "g": 20, "b": 30}},
                {"op": "get_background"},
                {"op": "pointer", "event": {"kind": "pressed", "button": "secondary", "pos": {"x": 1, "y": 2}}}
            ]"#,
        );
        let (mut controller, _log) =
            recording_controller(ControllerConfig::default(), RecordingView::new)?;
        let outputs = script
            .iter()
            .map(|command| apply(&mut controller, command))
            .collect::<Result<Vec<_>>>()?;
        assert_eq!(
            outputs,
            vec![
                CommandOutput::None,
                CommandOutput::Background {
                    color: Rgb8::new(10, 20, 30)
                },
                CommandOutput::ContextMenu {
                    menu: ContextMenu {
                        anchor: pos2(1, 32),
                        kind: ContextMenuKind::Default
                    }
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn unknown_projection_surfaces_as_error() -> Result<()> {
        let (mut controller, log) =
            recording_controller(ControllerConfig::default(), RecordingView::new)?;
        let command = ViewerCommand::SetProjection {
            key: "sideways".to_string(),
        };
        assert!(matches!(
            apply(&mut controller, &command),
            Err(Error::UnknownProjection(_))
        ));
        assert!(log.is_empty());
        Ok(())
    }
}
