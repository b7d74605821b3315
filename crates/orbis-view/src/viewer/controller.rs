use orbis_base::{Error, Guid, Result, Rgb8};
use serde::Serialize;
use tracing::{debug, error, warn};

use super::backend::{SceneBackend, ViewBackend};
use super::camera::CameraState;
use super::config::ControllerConfig;
use super::gesture::{Gesture, InteractionMode};
use super::input::{PointerButton, PointerEvent};
use super::projection::{ProjectionKey, ProjectionPresets};
use super::selection::{SelectionDispatcher, SelectionRequest};
use super::ui::{Point2, Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextMenuKind {
    /// Actions on the current selection.
    Objects,
    /// Viewer-wide actions, offered when nothing is selected.
    Default,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ContextMenu {
    pub anchor: Point2,
    pub kind: ContextMenuKind,
}

/// Drives one viewport: pointer input in, camera and selection calls out.
///
/// Backends are injected and may be absent; camera and selection operations
/// against a missing backend are skipped.
pub struct ViewportController<V, S> {
    id: Guid,
    config: ControllerConfig,
    view: Option<V>,
    scene: Option<S>,
    camera: CameraState,
    mode: InteractionMode,
    gesture: Option<Gesture>,
    selection: SelectionDispatcher,
}

impl<V: ViewBackend, S: SceneBackend> ViewportController<V, S> {
    pub fn new(config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            id: Guid::new(),
            camera: CameraState::with_scale(config.initial_scale),
            config,
            view: None,
            scene: None,
            mode: InteractionMode::Idle,
            gesture: None,
            selection: SelectionDispatcher,
        })
    }

    pub fn with_view(mut self, view: V) -> Self {
        self.view = Some(view);
        self
    }

    pub fn with_scene(mut self, scene: S) -> Self {
        self.scene = Some(scene);
        self
    }

    pub fn id(&self) -> Guid {
        self.id
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn camera(&self) -> &CameraState {
        &self.camera
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        self.gesture.as_ref()
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut V> {
        self.view.as_mut()
    }

    pub fn scene(&self) -> Option<&S> {
        self.scene.as_ref()
    }

    pub fn attach_view(&mut self, view: V) -> Option<V> {
        debug!(viewport = %self.id, "view backend attached");
        self.view.replace(view)
    }

    pub fn detach_view(&mut self) -> Option<V> {
        debug!(viewport = %self.id, "view backend detached");
        self.view.take()
    }

    pub fn attach_scene(&mut self, scene: S) -> Option<S> {
        debug!(viewport = %self.id, "scene backend attached");
        self.scene.replace(scene)
    }

    pub fn detach_scene(&mut self) -> Option<S> {
        debug!(viewport = %self.id, "scene backend detached");
        self.scene.take()
    }

    /// True when no mode is active and no button gesture is open.
    pub fn is_idle(&self) -> bool {
        self.mode == InteractionMode::Idle && self.gesture.is_none()
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<Option<ContextMenu>> {
        match event {
            PointerEvent::Pressed {
                button: PointerButton::Primary,
                pos,
                modifiers,
            } => {
                if modifiers.ctrl && self.is_idle() {
                    self.start_rotation(pos.x, pos.y)?;
                } else {
                    self.on_primary_press(pos.x, pos.y)?;
                }
            }
            PointerEvent::Pressed {
                button: PointerButton::Secondary,
                pos,
                ..
            } => return Ok(Some(self.on_secondary_press(pos.x, pos.y))),
            PointerEvent::Pressed {
                button: PointerButton::Middle,
                pos,
                ..
            } => self.on_middle_press(pos),
            PointerEvent::Moved { pos, .. } => self.on_move(pos.x, pos.y)?,
            PointerEvent::Released {
                button: PointerButton::Primary,
                pos,
                modifiers,
            } => self.on_primary_release(pos.x, pos.y, modifiers.shift)?,
            PointerEvent::Released {
                button: PointerButton::Middle,
                ..
            } => self.on_middle_release(),
            PointerEvent::Released {
                button: PointerButton::Secondary,
                ..
            } => {}
            PointerEvent::FocusLost => self.abort_gesture()?,
        }
        Ok(None)
    }

    pub fn on_primary_press(&mut self, x: i32, y: i32) -> Result<()> {
        if self.gesture.is_some() {
            return self.ignore("primary press");
        }
        let pos = Point2::new(x, y);
        match self.mode {
            InteractionMode::Idle => {
                self.gesture = Some(Gesture::begin(PointerButton::Primary, pos));
                self.dispatch_selection(SelectionRequest::Hover { at: pos })
            }
            InteractionMode::Panning | InteractionMode::RectSelecting => {
                self.gesture = Some(Gesture::begin(PointerButton::Primary, pos));
                Ok(())
            }
            InteractionMode::Rotating | InteractionMode::Dragging => self.ignore("primary press"),
        }
    }

    pub fn on_move(&mut self, x: i32, y: i32) -> Result<()> {
        let pos = Point2::new(x, y);
        if self.mode == InteractionMode::Rotating {
            return self.update_rotation(x, y);
        }

        let Some(gesture) = self.gesture.as_mut() else {
            return self.dispatch_selection(SelectionRequest::Hover { at: pos });
        };

        let button = gesture.button;
        match button {
            PointerButton::Primary => {
                gesture.track(pos);
                if gesture.has_moved && self.mode == InteractionMode::Idle {
                    self.enter(InteractionMode::Dragging);
                }
                Ok(())
            }
            PointerButton::Middle => {
                // Screen y grows downwards, view y upwards.
                let delta = pos - gesture.current;
                gesture.track(pos);
                if delta.is_zero() {
                    Ok(())
                } else {
                    self.pan(delta.x, -delta.y)
                }
            }
            PointerButton::Secondary => Ok(()),
        }
    }

    pub fn on_primary_release(&mut self, x: i32, y: i32, shift_held: bool) -> Result<()> {
        if self.mode == InteractionMode::Rotating {
            return self.end_rotation();
        }
        let Some(mut gesture) = self
            .gesture
            .take_if(|gesture| gesture.button == PointerButton::Primary)
        else {
            return self.ignore("primary release");
        };
        gesture.finish(Point2::new(x, y), shift_held);

        let mode = self.mode;
        self.enter(InteractionMode::Idle);
        match mode {
            InteractionMode::Idle | InteractionMode::Dragging => {
                self.dispatch_selection(SelectionRequest::from_release(&gesture))
            }
            InteractionMode::Panning => self.set_center(x, y),
            InteractionMode::RectSelecting => {
                if gesture.is_drag() {
                    self.window_fit(gesture.rect())
                } else {
                    Ok(())
                }
            }
            InteractionMode::Rotating => Ok(()),
        }
    }

    pub fn on_secondary_press(&self, x: i32, y: i32) -> ContextMenu {
        let has_selection = self
            .scene
            .as_ref()
            .is_some_and(|scene| scene.has_selection());
        let kind = if has_selection {
            ContextMenuKind::Objects
        } else {
            ContextMenuKind::Default
        };
        let anchor = Point2::new(x, y) + Vec2::new(0, self.config.context_menu_offset);
        debug!(viewport = %self.id, ?anchor, ?kind, "context menu");
        ContextMenu { anchor, kind }
    }

    fn on_middle_press(&mut self, pos: Point2) {
        if self.is_idle() {
            self.gesture = Some(Gesture::begin(PointerButton::Middle, pos));
        }
    }

    fn on_middle_release(&mut self) {
        self.gesture
            .take_if(|gesture| gesture.button == PointerButton::Middle);
    }

    pub fn start_rotation(&mut self, x0: i32, y0: i32) -> Result<()> {
        match self.mode {
            InteractionMode::Rotating => {
                error!(viewport = %self.id, "rotation started while another rotation is open");
                if cfg!(debug_assertions) {
                    panic!("{}", Error::ReentrantGestureStart);
                }
                return Err(Error::ReentrantGestureStart);
            }
            InteractionMode::Idle if self.gesture.is_none() => {}
            _ => return self.ignore("start rotation"),
        }

        let Some(view) = self.view.as_mut() else {
            return self.no_view("start rotation");
        };
        let was_on = view.is_degenerate_mode_on()?;
        view.set_degenerate_mode_on()?;
        if let Err(err) = view.start_rotation(x0, y0, 0.0) {
            if !was_on {
                if let Err(restore) = view.set_degenerate_mode_off() {
                    warn!(
                        viewport = %self.id,
                        %restore,
                        "degenerate mode left on after failed rotation start"
                    );
                }
            }
            return Err(err);
        }
        self.camera.capture_degenerate_mode(was_on);
        self.enter(InteractionMode::Rotating);
        Ok(())
    }

    pub fn update_rotation(&mut self, x: i32, y: i32) -> Result<()> {
        if self.mode != InteractionMode::Rotating {
            return self.ignore("update rotation");
        }
        let Some(view) = self.view.as_mut() else {
            return self.no_view("update rotation");
        };
        view.rotation(x, y)
    }

    pub fn end_rotation(&mut self) -> Result<()> {
        if self.mode != InteractionMode::Rotating {
            return self.ignore("end rotation");
        }
        self.enter(InteractionMode::Idle);
        let was_on = self.camera.take_degenerate_mode();
        if was_on != Some(false) {
            return Ok(());
        }
        let Some(view) = self.view.as_mut() else {
            return self.no_view("end rotation");
        };
        view.set_degenerate_mode_off()
    }

    /// Drops whatever gesture is open, as if its release had arrived without effect.
    ///
    /// An open rotation still gets its degenerate-mode restore.
    pub fn abort_gesture(&mut self) -> Result<()> {
        if self.mode == InteractionMode::Rotating {
            debug!(viewport = %self.id, "rotation aborted");
            return self.end_rotation();
        }
        if self.gesture.take().is_some() || self.mode != InteractionMode::Idle {
            debug!(viewport = %self.id, mode = ?self.mode, "gesture aborted");
        }
        self.enter(InteractionMode::Idle);
        Ok(())
    }

    pub fn pan(&mut self, dx: i32, dy: i32) -> Result<()> {
        let scale = self.config.pan_scale;
        let Some(view) = self.view.as_mut() else {
            return self.no_view("pan");
        };
        view.pan(dx, dy, scale)
    }

    pub fn zoom(&mut self, from: Point2, to: Point2) -> Result<()> {
        let Some(view) = self.view.as_mut() else {
            return self.no_view("zoom");
        };
        view.zoom(from.x, from.y, to.x, to.y)
    }

    /// Remembers the current zoom, then frames the whole scene; the next primary
    /// click re-centers the camera at the remembered zoom.
    pub fn activate_global_panning(&mut self) -> Result<()> {
        if !self.is_idle() {
            return self.ignore("activate global panning");
        }
        let (margin, animate) = (self.config.fit_margin, false);
        let Some(view) = self.view.as_mut() else {
            return self.no_view("activate global panning");
        };
        let scale = view.current_scale()?;
        self.camera.set_scale(scale);
        view.fit_all(margin, animate)?;
        self.enter(InteractionMode::Panning);
        Ok(())
    }

    pub fn set_center(&mut self, x: i32, y: i32) -> Result<()> {
        let scale = self.camera.scale();
        let Some(view) = self.view.as_mut() else {
            return self.no_view("set center");
        };
        view.place(x, y, scale)?;
        self.camera.set_center(Point2::new(x, y));
        if self.mode == InteractionMode::Panning {
            self.enter(InteractionMode::Idle);
        }
        Ok(())
    }

    pub fn fit_all(&mut self) -> Result<()> {
        let config = &self.config;
        let Some(view) = self.view.as_mut() else {
            return self.no_view("fit all");
        };
        view.fit_all(config.fit_margin, config.animate_fit)?;
        view.z_fit_all(config.z_fit_margin)
    }

    pub fn window_fit(&mut self, rect: Rect) -> Result<()> {
        let Some(view) = self.view.as_mut() else {
            return self.no_view("window fit");
        };
        view.window_fit(rect.from.x, rect.from.y, rect.to.x, rect.to.y)
    }

    /// Arms window fit: the next primary drag frames the dragged rectangle.
    pub fn activate_window_fit(&mut self) -> Result<()> {
        if !self.is_idle() {
            return self.ignore("activate window fit");
        }
        self.enter(InteractionMode::RectSelecting);
        Ok(())
    }

    pub fn set_projection(&mut self, key: ProjectionKey) -> Result<()> {
        let orientation = ProjectionPresets::orientation(key);
        let Some(view) = self.view.as_mut() else {
            return self.no_view("set projection");
        };
        debug!(viewport = %self.id, %key, ?orientation, "projection");
        view.set_projection(orientation)
    }

    pub fn set_projection_named(&mut self, name: &str) -> Result<()> {
        let key: ProjectionKey = name.parse()?;
        self.set_projection(key)
    }

    /// Direct pass-through. During a rotation the requested value also becomes the
    /// state restored when the rotation ends.
    pub fn set_degenerate_mode(&mut self, on: bool) -> Result<()> {
        let Some(view) = self.view.as_mut() else {
            return self.no_view("set degenerate mode");
        };
        if on {
            view.set_degenerate_mode_on()?;
        } else {
            view.set_degenerate_mode_off()?;
        }
        if self.mode == InteractionMode::Rotating {
            self.camera.capture_degenerate_mode(on);
        }
        Ok(())
    }

    pub fn reset_view(&mut self) -> Result<()> {
        let Some(view) = self.view.as_mut() else {
            return self.no_view("reset view");
        };
        view.reset()
    }

    pub fn background_color(&mut self) -> Result<Rgb8> {
        let view = self.view.as_ref().ok_or(Error::NoActiveBackend)?;
        let color = view.background_color()?;
        self.camera.set_background(color);
        Ok(color.to_rgb8())
    }

    pub fn set_background_color(&mut self, color: Rgb8) -> Result<()> {
        let Some(view) = self.view.as_mut() else {
            return self.no_view("set background color");
        };
        let normalized = color.to_rgb();
        view.set_background_color(normalized)?;
        self.camera.set_background(normalized);
        view.redraw()
    }

    fn dispatch_selection(&mut self, request: SelectionRequest) -> Result<()> {
        let Some(scene) = self.scene.as_mut() else {
            debug!(viewport = %self.id, ?request, "no scene backend attached, skipping");
            return Ok(());
        };
        self.selection.dispatch(scene, request)
    }

    fn enter(&mut self, mode: InteractionMode) {
        if self.mode != mode {
            debug!(viewport = %self.id, from = self.mode.name(), to = mode.name(), "mode change");
            self.mode = mode;
        }
    }

    fn ignore(&self, operation: &'static str) -> Result<()> {
        let err = Error::InvalidStateTransition {
            operation,
            mode: self.mode.name(),
        };
        warn!(viewport = %self.id, %err, "ignored");
        Ok(())
    }

    fn no_view(&self, operation: &'static str) -> Result<()> {
        debug!(viewport = %self.id, operation, "{}, skipping", Error::NoActiveBackend);
        Ok(())
    }
}
