use serde::{Deserialize, Serialize};

use super::ui::Point2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ctrl: false,
    };

    pub const CTRL: Self = Self {
        shift: false,
        ctrl: true,
    };
}

/// Raw pointer input as delivered by the windowing layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerEvent {
    Pressed {
        button: PointerButton,
        pos: Point2,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Moved {
        pos: Point2,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Released {
        button: PointerButton,
        pos: Point2,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// The viewport lost focus; any release for an open gesture will never arrive.
    FocusLost,
}
