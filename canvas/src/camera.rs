#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::consts::{ZOOM_MAX, ZOOM_MIN, ZOOM_WHEEL_BASE, ZOOM_WHEEL_STEP};

/// A point in either screen or canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pan/zoom camera for the canvas viewport.
///
/// `x` / `y` are the camera translation in CSS pixels. `scale` is a zoom
/// factor (1.0 = identity). Camera state is per-session view state: it is
/// never persisted and resets whenever a project is opened.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, scale: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels, viewport-relative) to
    /// canvas coordinates.
    #[must_use]
    pub fn screen_to_canvas(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.x) / self.scale,
            y: (screen.y - self.y) / self.scale,
        }
    }

    /// Convert a canvas-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn canvas_to_screen(&self, canvas: Point) -> Point {
        Point {
            x: canvas.x * self.scale + self.x,
            y: canvas.y * self.scale + self.y,
        }
    }

    /// Convert a screen-space distance (pixels) to canvas-space distance.
    #[must_use]
    pub fn screen_dist_to_canvas(&self, screen_dist: f64) -> f64 {
        screen_dist / self.scale
    }

    /// Translate the camera by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Apply a wheel-zoom step anchored at `cursor` (screen space).
    ///
    /// The response is exponential in the wheel delta and the scale is
    /// clamped to `[ZOOM_MIN, ZOOM_MAX]`. The translation is recomputed so
    /// that the canvas point under the cursor stays fixed.
    pub fn zoom_at(&mut self, cursor: Point, wheel_dy: f64) {
        let factor = ZOOM_WHEEL_BASE.powf(-wheel_dy / ZOOM_WHEEL_STEP);
        let new_scale = (self.scale * factor).clamp(ZOOM_MIN, ZOOM_MAX);
        let ratio = new_scale / self.scale;
        self.x = cursor.x - (cursor.x - self.x) * ratio;
        self.y = cursor.y - (cursor.y - self.y) * ratio;
        self.scale = new_scale;
    }

    /// Reset to the identity transform.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
