mod backend;
mod camera;
mod config;
mod controller;
mod gesture;
mod input;
mod projection;
mod recording;
mod selection;
mod ui;

pub use backend::{PickTarget, SceneBackend, ViewBackend};
pub use camera::CameraState;
pub use config::{
    ControllerConfig, DEFAULT_CONTEXT_MENU_OFFSET, DEFAULT_FIT_MARGIN, DEFAULT_PAN_SCALE,
    DEFAULT_Z_FIT_MARGIN,
};
pub use controller::{ContextMenu, ContextMenuKind, ViewportController};
pub use gesture::{Gesture, InteractionMode};
pub use input::{Modifiers, PointerButton, PointerEvent};
pub use projection::{Orientation, ProjectionKey, ProjectionPresets};
pub use recording::{BackendCall, CallLog, RecordingScene, RecordingView};
pub use selection::{SelectionDispatcher, SelectionRequest};
pub use ui::{Point2, Rect, Vec2, pos2, vec2};
