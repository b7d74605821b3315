use serde::Serialize;

use super::input::PointerButton;
use super::ui::{Point2, Rect};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    #[default]
    Idle,
    Rotating,
    /// Global panning armed: the next primary click re-centers the camera.
    Panning,
    /// Window fit armed: the next primary drag frames the dragged rectangle.
    RectSelecting,
    /// A primary gesture has moved and will end in a rectangle selection.
    Dragging,
}

impl InteractionMode {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Rotating => "rotating",
            Self::Panning => "panning",
            Self::RectSelecting => "rect-selecting",
            Self::Dragging => "dragging",
        }
    }
}

/// One press-move-release sequence, alive from press to release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Gesture {
    pub button: PointerButton,
    pub start: Point2,
    pub current: Point2,
    pub shift_held: bool,
    pub has_moved: bool,
}

impl Gesture {
    pub fn begin(button: PointerButton, start: Point2) -> Self {
        Self {
            button,
            start,
            current: start,
            shift_held: false,
            has_moved: false,
        }
    }

    /// Any nonzero displacement from the anchor counts as a drag; there is no dead zone.
    pub fn track(&mut self, pos: Point2) {
        self.current = pos;
        if !(pos - self.start).is_zero() {
            self.has_moved = true;
        }
    }

    pub fn finish(&mut self, pos: Point2, shift_held: bool) {
        self.track(pos);
        self.shift_held = shift_held;
    }

    /// A drag that came back to its anchor spans no area and is treated as a click.
    pub fn is_drag(&self) -> bool {
        self.has_moved && !(self.current - self.start).is_zero()
    }

    pub fn rect(&self) -> Rect {
        Rect::from_points(self.start, self.current)
    }
}
