//! Input model: mouse buttons, modifier keys, and the gesture state machine.
//!
//! `InputState` is the active gesture being tracked between pointer-down and
//! pointer-up. Gestures are mutually exclusive: exactly one variant is live
//! at a time, carrying all context needed to compute incremental deltas and
//! emit final mutations on release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::item::{ItemId, PathPoint};

/// Keyboard modifier keys held during an event.
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

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Internal state of the gesture state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving an item by its header.
    Dragging {
        /// Id of the item being dragged.
        id: ItemId,
        /// Screen-space position of the initial pointer-down.
        start_screen: Point,
        /// Item x at the start of the drag.
        orig_x: f64,
        /// Item y at the start of the drag.
        orig_y: f64,
    },
    /// The user is resizing an item by its bottom-right handle.
    Resizing {
        /// Id of the item being resized.
        id: ItemId,
        /// Screen-space position of the initial pointer-down.
        start_screen: Point,
        /// Item width at the start of the resize.
        orig_w: f64,
        /// Item height at the start of the resize.
        orig_h: f64,
    },
    /// The user is panning the viewport by dragging the background.
    Panning {
        /// Screen-space position of the initial pointer-down.
        start_screen: Point,
        /// Camera translation x at the start of the pan.
        orig_cam_x: f64,
        /// Camera translation y at the start of the pan.
        orig_cam_y: f64,
    },
    /// The user is drawing a stroke on a pen item's surface.
    Drawing {
        /// Id of the pen item receiving the stroke.
        id: ItemId,
        /// Accumulated points in item-local coordinates. Committed as one
        /// immutable stroke on release if at least two were captured.
        points: Vec<PathPoint>,
    },
}
