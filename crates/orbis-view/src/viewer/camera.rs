use orbis_base::Rgb;

use super::ui::Point2;

#[derive(Clone, Debug)]
pub struct CameraState {
    scale: f64,
    center: Point2,
    degenerate_mode_was_on: Option<bool>,
    background: Option<Rgb>,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::with_scale(1.0)
    }
}

impl CameraState {
    pub fn with_scale(scale: f64) -> Self {
        Self {
            scale,
            center: Point2::default(),
            degenerate_mode_was_on: None,
            background: None,
        }
    }

    /// Zoom factor captured by the last global-panning snapshot.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub(crate) fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn center(&self) -> Point2 {
        self.center
    }

    pub(crate) fn set_center(&mut self, center: Point2) {
        self.center = center;
    }

    /// Degenerate-mode flag as it was before the open rotation gesture, if any.
    pub fn degenerate_mode_was_on(&self) -> Option<bool> {
        self.degenerate_mode_was_on
    }

    pub(crate) fn capture_degenerate_mode(&mut self, was_on: bool) {
        self.degenerate_mode_was_on = Some(was_on);
    }

    pub(crate) fn take_degenerate_mode(&mut self) -> Option<bool> {
        self.degenerate_mode_was_on.take()
    }

    pub fn background(&self) -> Option<Rgb> {
        self.background
    }

    pub(crate) fn set_background(&mut self, color: Rgb) {
        self.background = Some(color);
    }
}
