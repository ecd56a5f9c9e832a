//! Shared numeric constants for the canvas crate.

// ── Item geometry ───────────────────────────────────────────────

/// Minimum item width in canvas units; resize clamps here.
pub const MIN_ITEM_WIDTH: f64 = 100.0;

/// Minimum item height in canvas units; resize clamps here.
pub const MIN_ITEM_HEIGHT: f64 = 60.0;

/// Default width applied when a stored record omits one.
pub const DEFAULT_ITEM_WIDTH: f64 = 200.0;

/// Default height applied when a stored record omits one.
pub const DEFAULT_ITEM_HEIGHT: f64 = 100.0;

/// Default stacking order applied when a stored record omits one.
pub const DEFAULT_Z_INDEX: i64 = 1;

/// Width of a freshly created pen or image item.
pub const MEDIA_ITEM_WIDTH: f64 = 300.0;

/// Height of a freshly created pen or image item.
pub const MEDIA_ITEM_HEIGHT: f64 = 200.0;

/// Height of a text item created from an OCR result.
pub const OCR_TEXT_HEIGHT: f64 = 150.0;

// ── Pen defaults ────────────────────────────────────────────────

/// Default stroke color for a new pen item.
pub const DEFAULT_PEN_COLOR: &str = "#333333";

/// Default stroke width for a new pen item, in canvas units.
pub const DEFAULT_PEN_STROKE_WIDTH: f64 = 2.0;

// ── Camera ──────────────────────────────────────────────────────

/// Minimum camera scale (zoomed all the way out).
pub const ZOOM_MIN: f64 = 0.1;

/// Maximum camera scale (zoomed all the way in).
pub const ZOOM_MAX: f64 = 5.0;

/// Base of the exponential wheel-zoom response.
pub const ZOOM_WHEEL_BASE: f64 = 1.1;

/// Wheel delta (pixels) that produces one full `ZOOM_WHEEL_BASE` step.
pub const ZOOM_WHEEL_STEP: f64 = 100.0;

// ── Hit regions ─────────────────────────────────────────────────

/// Height of the drag header strip at the top of every item, in canvas units.
pub const HEADER_HEIGHT: f64 = 28.0;

/// Side length of the delete control square at the header's right edge.
pub const DELETE_BUTTON_SIZE: f64 = 24.0;

/// Side length of the resize handle square at the bottom-right corner.
pub const RESIZE_HANDLE_SIZE: f64 = 16.0;
