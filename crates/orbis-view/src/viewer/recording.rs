//! In-memory backends that record every mutating call instead of rendering.
//!
//! Both halves push into one shared [`CallLog`], so the interleaving of camera and
//! selection calls stays observable.

use std::cell::RefCell;
use std::rc::Rc;

use orbis_base::{Error, Result, Rgb};
use serde::{Deserialize, Serialize};

use super::backend::{PickTarget, SceneBackend, ViewBackend};
use super::projection::Orientation;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum BackendCall {
    FitAll { margin: f64, animate: bool },
    ZFitAll { margin: f64 },
    WindowFit { x0: i32, y0: i32, x1: i32, y1: i32 },
    Zoom { x0: i32, y0: i32, x1: i32, y1: i32 },
    Pan { dx: i32, dy: i32, scale: f64 },
    Place { x: i32, y: i32, scale: f64 },
    StartRotation { x0: i32, y0: i32, angle0: f64 },
    Rotation { x: i32, y: i32 },
    SetDegenerateModeOn,
    SetDegenerateModeOff,
    SetProjection { orientation: Orientation },
    Reset,
    SetBackgroundColor { color: Rgb },
    Redraw,
    MoveTo { x: i32, y: i32 },
    Select { target: PickTarget },
    ShiftSelect { target: PickTarget },
}

#[derive(Clone, Debug, Default)]
pub struct CallLog(Rc<RefCell<Vec<BackendCall>>>);

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, call: BackendCall) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.0.borrow().clone()
    }

    pub fn take(&self) -> Vec<BackendCall> {
        std::mem::take(&mut *self.0.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

#[derive(Clone, Debug)]
pub struct RecordingView {
    log: CallLog,
    degenerate: bool,
    scale: f64,
    fit_scale: f64,
    background: Rgb,
    pending_failure: Option<(usize, String)>,
}

impl RecordingView {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            degenerate: false,
            scale: 1.0,
            fit_scale: 1.0,
            background: Rgb::BLACK,
            pending_failure: None,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Scale the simulated camera ends up at after a fit-all.
    pub fn with_fit_scale(mut self, scale: f64) -> Self {
        self.fit_scale = scale;
        self
    }

    pub fn with_degenerate_mode(mut self, on: bool) -> Self {
        self.degenerate = on;
        self
    }

    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background = color;
        self
    }

    /// Makes the next mutating call fail without being applied.
    pub fn fail_next(&mut self, message: impl Into<String>) {
        self.fail_after(0, message);
    }

    /// Lets `skip` mutating calls through, then fails the one after them.
    pub fn fail_after(&mut self, skip: usize, message: impl Into<String>) {
        self.pending_failure = Some((skip, message.into()));
    }

    pub fn degenerate_mode(&self) -> bool {
        self.degenerate
    }

    fn record(&mut self, call: BackendCall) -> Result<()> {
        match self.pending_failure.take() {
            Some((0, message)) => return Err(Error::Backend(message)),
            Some((skip, message)) => self.pending_failure = Some((skip - 1, message)),
            None => {}
        }
        self.log.push(call);
        Ok(())
    }
}

impl ViewBackend for RecordingView {
    fn fit_all(&mut self, margin: f64, animate: bool) -> Result<()> {
        self.record(BackendCall::FitAll { margin, animate })?;
        self.scale = self.fit_scale;
        Ok(())
    }

    fn z_fit_all(&mut self, margin: f64) -> Result<()> {
        self.record(BackendCall::ZFitAll { margin })
    }

    fn window_fit(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<()> {
        self.record(BackendCall::WindowFit { x0, y0, x1, y1 })
    }

    fn zoom(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<()> {
        self.record(BackendCall::Zoom { x0, y0, x1, y1 })
    }

    fn pan(&mut self, dx: i32, dy: i32, scale: f64) -> Result<()> {
        self.record(BackendCall::Pan { dx, dy, scale })
    }

    fn place(&mut self, x: i32, y: i32, scale: f64) -> Result<()> {
        self.record(BackendCall::Place { x, y, scale })?;
        self.scale = scale;
        Ok(())
    }

    fn start_rotation(&mut self, x0: i32, y0: i32, angle0: f64) -> Result<()> {
        self.record(BackendCall::StartRotation { x0, y0, angle0 })
    }

    fn rotation(&mut self, x: i32, y: i32) -> Result<()> {
        self.record(BackendCall::Rotation { x, y })
    }

    fn is_degenerate_mode_on(&self) -> Result<bool> {
        Ok(self.degenerate)
    }

    fn set_degenerate_mode_on(&mut self) -> Result<()> {
        self.record(BackendCall::SetDegenerateModeOn)?;
        self.degenerate = true;
        Ok(())
    }

    fn set_degenerate_mode_off(&mut self) -> Result<()> {
        self.record(BackendCall::SetDegenerateModeOff)?;
        self.degenerate = false;
        Ok(())
    }

    fn set_projection(&mut self, orientation: Orientation) -> Result<()> {
        self.record(BackendCall::SetProjection { orientation })
    }

    fn reset(&mut self) -> Result<()> {
        self.record(BackendCall::Reset)?;
        self.scale = 1.0;
        Ok(())
    }

    fn background_color(&self) -> Result<Rgb> {
        Ok(self.background)
    }

    fn set_background_color(&mut self, color: Rgb) -> Result<()> {
        self.record(BackendCall::SetBackgroundColor { color })?;
        self.background = color;
        Ok(())
    }

    fn redraw(&mut self) -> Result<()> {
        self.record(BackendCall::Redraw)
    }

    fn current_scale(&self) -> Result<f64> {
        Ok(self.scale)
    }
}

#[derive(Clone, Debug)]
pub struct RecordingScene {
    log: CallLog,
    picks_hit: bool,
    selected: bool,
}

impl RecordingScene {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            picks_hit: true,
            selected: false,
        }
    }

    /// Whether simulated picks land on an object.
    pub fn with_picks_hit(mut self, hit: bool) -> Self {
        self.picks_hit = hit;
        self
    }

    pub fn with_selection(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

impl SceneBackend for RecordingScene {
    fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.log.push(BackendCall::MoveTo { x, y });
        Ok(())
    }

    fn select(&mut self, target: PickTarget) -> Result<()> {
        self.log.push(BackendCall::Select { target });
        self.selected = self.picks_hit;
        Ok(())
    }

    fn shift_select(&mut self, target: PickTarget) -> Result<()> {
        self.log.push(BackendCall::ShiftSelect { target });
        self.selected |= self.picks_hit;
        Ok(())
    }

    fn has_selection(&self) -> bool {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_call_is_not_recorded() {
        let log = CallLog::new();
        let mut view = RecordingView::new(log.clone());
        view.fail_next("device lost");
        assert!(matches!(view.redraw(), Err(Error::Backend(message)) if message == "device lost"));
        assert!(log.is_empty());
        view.redraw().unwrap();
        assert_eq!(log.calls(), vec![BackendCall::Redraw]);
    }

    #[test]
    fn delayed_failure_skips_earlier_calls() -> Result<()> {
        let log = CallLog::new();
        let mut view = RecordingView::new(log.clone());
        view.fail_after(1, "lost");
        view.reset()?;
        assert!(view.redraw().is_err());
        view.redraw()?;
        assert_eq!(log.calls(), vec![BackendCall::Reset, BackendCall::Redraw]);
        Ok(())
    }

    #[test]
    fn select_replaces_and_shift_select_extends() -> Result<()> {
        let log = CallLog::new();
        let target = PickTarget::Point {
            at: crate::viewer::ui::pos2(1, 2),
        };
        let mut scene = RecordingScene::new(log.clone()).with_picks_hit(false).with_selection(true);
        scene.shift_select(target)?;
        assert!(scene.has_selection());
        scene.select(target)?;
        assert!(!scene.has_selection());
        assert_eq!(log.len(), 2);
        Ok(())
    }
}
