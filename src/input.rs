//! Input model: modifier keys, mouse buttons, and the gesture state machine.
//!
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up, carrying the context needed to apply incremental updates on
//! each move and to decide whether the release commits a history snapshot.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::hit::ResizeAnchor;
use crate::snap::{ActiveGuides, Axis};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key as reported by the browser's `KeyboardEvent.key`
/// (e.g. `"Delete"`, `"ArrowLeft"`, `"z"`, `" "`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Whether this is the space bar, the pan modifier.
    #[must_use]
    pub fn is_space(&self) -> bool {
        self.0 == " " || self.0 == "Space" || self.0 == "Spacebar"
    }

    /// Unit direction for arrow keys.
    #[must_use]
    pub fn arrow(&self) -> Option<(f64, f64)> {
        match self.0.as_str() {
            "ArrowLeft" => Some((-1.0, 0.0)),
            "ArrowRight" => Some((1.0, 0.0)),
            "ArrowUp" => Some((0.0, -1.0)),
            "ArrowDown" => Some((0.0, 1.0)),
            _ => None,
        }
    }

    /// Case-insensitive match for letter shortcuts.
    #[must_use]
    pub fn is_letter(&self, letter: char) -> bool {
        let mut chars = self.0.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.eq_ignore_ascii_case(&letter))
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down, which zooms out).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone)]
pub struct UiState {
    /// Space bar is held down; pointer-down starts a pan.
    pub space_held: bool,
    /// Guides that captured the most recent snap.
    pub active_guides: ActiveGuides,
    /// Last cursor sent to the host.
    pub cursor: &'static str,
    /// The host is showing the context menu.
    pub context_menu_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self { space_held: false, active_guides: ActiveGuides::default(), cursor: "default", context_menu_open: false }
    }
}

/// Internal state for the input state machine.
///
/// Each active variant carries gesture context needed to apply pointer
/// moves and to finish the gesture on pointer-up.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an object across the canvas.
    Dragging {
        /// Index of the object being dragged.
        index: usize,
        /// World-space position of the pointer at the previous event.
        last_world: Point,
    },
    /// The user is resizing an object by dragging one of its eight handles.
    Resizing {
        /// Index of the object being resized.
        index: usize,
        /// Which corner/edge handle is being dragged.
        anchor: ResizeAnchor,
    },
    /// The user is rotating an object by dragging the rotate handle.
    Rotating {
        /// Index of the object being rotated.
        index: usize,
    },
    /// The user is panning the view with the space bar held.
    Panning {
        /// Screen-space position of the previous pointer event.
        last_screen: Point,
    },
    /// The user is positioning a guide pulled out of a ruler.
    DraggingGuide {
        axis: Axis,
        /// Index of the guide within its axis list.
        index: usize,
    },
}

impl InputState {
    /// Whether releasing the pointer in this state should record history.
    #[must_use]
    pub fn commits_on_release(&self) -> bool {
        matches!(self, Self::Dragging { .. } | Self::Resizing { .. } | Self::Rotating { .. })
    }

    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging { .. } => "dragging",
            Self::Resizing { .. } => "resizing",
            Self::Rotating { .. } => "rotating",
            Self::Panning { .. } => "panning",
            Self::DraggingGuide { .. } => "dragging-guide",
        }
    }
}
