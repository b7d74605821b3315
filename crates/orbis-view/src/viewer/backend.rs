use orbis_base::{Result, Rgb};
use serde::{Deserialize, Serialize};

use super::projection::Orientation;
use super::ui::{Point2, Rect};

/// Camera-side capabilities of the rendering kernel behind one viewport.
///
/// Every call is synchronous; a returned error leaves the camera at its last
/// successfully applied state.
pub trait ViewBackend {
    fn fit_all(&mut self, margin: f64, animate: bool) -> Result<()>;
    fn z_fit_all(&mut self, margin: f64) -> Result<()>;
    fn window_fit(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<()>;
    fn zoom(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> Result<()>;
    fn pan(&mut self, dx: i32, dy: i32, scale: f64) -> Result<()>;
    fn place(&mut self, x: i32, y: i32, scale: f64) -> Result<()>;
    fn start_rotation(&mut self, x0: i32, y0: i32, angle0: f64) -> Result<()>;
    fn rotation(&mut self, x: i32, y: i32) -> Result<()>;
    fn is_degenerate_mode_on(&self) -> Result<bool>;
    fn set_degenerate_mode_on(&mut self) -> Result<()>;
    fn set_degenerate_mode_off(&mut self) -> Result<()>;
    fn set_projection(&mut self, orientation: Orientation) -> Result<()>;
    fn reset(&mut self) -> Result<()>;
    fn background_color(&self) -> Result<Rgb>;
    fn set_background_color(&mut self, color: Rgb) -> Result<()>;
    fn redraw(&mut self) -> Result<()>;
    fn current_scale(&self) -> Result<f64>;
}

/// Where a pick is evaluated: at a single pointer position or over a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PickTarget {
    Point { at: Point2 },
    Rect { rect: Rect },
}

/// Picking and highlight capabilities of the interactive scene.
pub trait SceneBackend {
    /// Hover detection at `(x, y)`; also anchors the next point pick.
    fn move_to(&mut self, x: i32, y: i32) -> Result<()>;
    /// Replaces the current selection with what lies under `target`.
    fn select(&mut self, target: PickTarget) -> Result<()>;
    /// Toggles what lies under `target` into the current selection.
    fn shift_select(&mut self, target: PickTarget) -> Result<()>;
    fn has_selection(&self) -> bool;
}
