use orbis_base::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::backend::{PickTarget, SceneBackend};
use super::gesture::Gesture;
use super::ui::{Point2, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionRequest {
    Hover { at: Point2 },
    SelectPoint { at: Point2, additive: bool },
    SelectRect { rect: Rect, additive: bool },
}

impl SelectionRequest {
    /// Classifies a finished primary gesture: a click picks at the anchor, a drag
    /// picks over the rectangle spanned by anchor and release point.
    pub fn from_release(gesture: &Gesture) -> Self {
        let additive = gesture.shift_held;
        if gesture.is_drag() {
            Self::SelectRect {
                rect: gesture.rect(),
                additive,
            }
        } else {
            Self::SelectPoint {
                at: gesture.start,
                additive,
            }
        }
    }
}

/// Turns selection requests into scene calls. Holds no state of its own.
#[derive(Clone, Copy, Debug, Default)]
pub struct SelectionDispatcher;

impl SelectionDispatcher {
    pub fn dispatch<S: SceneBackend + ?Sized>(
        &self,
        scene: &mut S,
        request: SelectionRequest,
    ) -> Result<()> {
        debug!(?request, "selection dispatch");
        match request {
            SelectionRequest::Hover { at } => scene.move_to(at.x, at.y),
            SelectionRequest::SelectPoint { at, additive } => {
                let target = PickTarget::Point { at };
                if additive {
                    scene.shift_select(target)
                } else {
                    scene.select(target)
                }
            }
            SelectionRequest::SelectRect { rect, additive } => {
                let target = PickTarget::Rect { rect };
                if additive {
                    scene.shift_select(target)
                } else {
                    scene.select(target)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::input::PointerButton;
    use crate::viewer::ui::pos2;

    fn gesture(start: Point2, end: Point2, shift: bool) -> Gesture {
        let mut gesture = Gesture::begin(PointerButton::Primary, start);
        gesture.finish(end, shift);
        gesture
    }

    #[test]
    fn click_classifies_as_point_pick() {
        let request = SelectionRequest::from_release(&gesture(pos2(10, 10), pos2(10, 10), false));
        assert_eq!(
            request,
            SelectionRequest::SelectPoint {
                at: pos2(10, 10),
                additive: false
            }
        );
    }

    #[test]
    fn drag_classifies_as_rect_pick() {
        let request = SelectionRequest::from_release(&gesture(pos2(10, 10), pos2(50, 80), true));
        assert_eq!(
            request,
            SelectionRequest::SelectRect {
                rect: Rect::from_points(pos2(10, 10), pos2(50, 80)),
                additive: true
            }
        );
    }
}
