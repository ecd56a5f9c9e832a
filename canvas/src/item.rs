//! Canvas item model: the three item variants and their wire records.
//!
//! Items are a tagged union over a shared geometry payload. On the wire each
//! item is a flat camelCase record `{id, type, x, y, width, height, zIndex,
//! ...variant fields}`; [`ItemRecord`] is that shape with every field
//! optional so that partial or legacy records still deserialize. Conversion
//! back into a [`CanvasItem`] applies geometry defaults and falls back to a
//! text item when the `type` discriminator is unknown or missing.

#[cfg(test)]
#[path = "item_test.rs"]
mod item_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{
    DEFAULT_ITEM_HEIGHT, DEFAULT_ITEM_WIDTH, DEFAULT_PEN_COLOR, DEFAULT_PEN_STROKE_WIDTH,
    DEFAULT_Z_INDEX, MEDIA_ITEM_HEIGHT, MEDIA_ITEM_WIDTH, OCR_TEXT_HEIGHT,
};

/// Unique identifier for a canvas item.
pub type ItemId = Uuid;

/// A single point of a committed pen stroke, in item-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A completed freehand stroke. Immutable once committed to a pen item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub points: Vec<PathPoint>,
    pub color: String,
    pub width: f64,
}

/// Variant payload of a canvas item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// Free-form user-editable note text.
    Text { content: String },
    /// Self-contained image encoding (a data URI); no separate blob storage.
    Image { src: String },
    /// An ink surface holding committed strokes plus stroke defaults.
    Pen {
        paths: Vec<Stroke>,
        color: String,
        stroke_width: f64,
    },
}

/// A positioned, sized, stackable object on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasItem {
    pub id: ItemId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Stacking order; higher values paint on top. Not required to be contiguous.
    pub z_index: i64,
    pub kind: ItemKind,
}

impl CanvasItem {
    /// Create an item with a fresh id and default stacking order.
    #[must_use]
    pub fn new(kind: ItemKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            x,
            y,
            width,
            height,
            z_index: DEFAULT_Z_INDEX,
            kind,
        }
    }

    /// A default-sized text note at the given canvas point.
    #[must_use]
    pub fn text(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self::new(
            ItemKind::Text { content: content.into() },
            x,
            y,
            DEFAULT_ITEM_WIDTH,
            DEFAULT_ITEM_HEIGHT,
        )
    }

    /// A text note sized for OCR output.
    #[must_use]
    pub fn ocr_text(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self::new(
            ItemKind::Text { content: content.into() },
            x,
            y,
            MEDIA_ITEM_WIDTH,
            OCR_TEXT_HEIGHT,
        )
    }

    /// An image item holding a data-URI source.
    #[must_use]
    pub fn image(x: f64, y: f64, src: impl Into<String>) -> Self {
        Self::new(
            ItemKind::Image { src: src.into() },
            x,
            y,
            MEDIA_ITEM_WIDTH,
            MEDIA_ITEM_HEIGHT,
        )
    }

    /// An empty pen surface with default stroke settings.
    #[must_use]
    pub fn pen(x: f64, y: f64) -> Self {
        Self::new(
            ItemKind::Pen {
                paths: Vec::new(),
                color: DEFAULT_PEN_COLOR.to_owned(),
                stroke_width: DEFAULT_PEN_STROKE_WIDTH,
            },
            x,
            y,
            MEDIA_ITEM_WIDTH,
            MEDIA_ITEM_HEIGHT,
        )
    }

    /// The wire discriminator for this item's variant.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ItemKind::Text { .. } => "text",
            ItemKind::Image { .. } => "image",
            ItemKind::Pen { .. } => "pen",
        }
    }

    /// Whether this item exposes a drawing surface.
    #[must_use]
    pub fn is_pen(&self) -> bool {
        matches!(self.kind, ItemKind::Pen { .. })
    }

    /// Append a committed stroke to a pen item. Returns `false` (and changes
    /// nothing) for non-pen items.
    pub fn add_stroke(&mut self, stroke: Stroke) -> bool {
        match &mut self.kind {
            ItemKind::Pen { paths, .. } => {
                paths.push(stroke);
                true
            }
            ItemKind::Text { .. } | ItemKind::Image { .. } => false,
        }
    }

    /// Build a [`Stroke`] from captured points using this pen item's
    /// defaults. Returns `None` for non-pen items.
    #[must_use]
    pub fn stroke_from_points(&self, points: Vec<PathPoint>) -> Option<Stroke> {
        match &self.kind {
            ItemKind::Pen { color, stroke_width, .. } => Some(Stroke {
                points,
                color: color.clone(),
                width: *stroke_width,
            }),
            ItemKind::Text { .. } | ItemKind::Image { .. } => None,
        }
    }

    /// Convert to the flat wire record.
    #[must_use]
    pub fn to_record(&self) -> ItemRecord {
        let mut record = ItemRecord {
            id: Some(self.id),
            kind: Some(self.kind_name().to_owned()),
            x: Some(self.x),
            y: Some(self.y),
            width: Some(self.width),
            height: Some(self.height),
            z_index: Some(self.z_index),
            ..ItemRecord::default()
        };
        match &self.kind {
            ItemKind::Text { content } => record.content = Some(content.clone()),
            ItemKind::Image { src } => record.src = Some(src.clone()),
            ItemKind::Pen { paths, color, stroke_width } => {
                record.paths = Some(paths.clone());
                record.color = Some(color.clone());
                record.stroke_width = Some(*stroke_width);
            }
        }
        record
    }

    /// Reconstruct an item from a wire record.
    ///
    /// Geometry defaults are applied for absent fields and a fresh id is
    /// generated when the record carries none. An unknown or missing `type`
    /// discriminator degrades to a text item with a warning rather than
    /// rejecting the record.
    #[must_use]
    pub fn from_record(record: ItemRecord) -> Self {
        let kind = match record.kind.as_deref() {
            Some("text") => ItemKind::Text {
                content: record.content.unwrap_or_default(),
            },
            Some("image") => ItemKind::Image {
                src: record.src.unwrap_or_default(),
            },
            Some("pen") => ItemKind::Pen {
                paths: record.paths.unwrap_or_default(),
                color: record.color.unwrap_or_else(|| DEFAULT_PEN_COLOR.to_owned()),
                stroke_width: record.stroke_width.unwrap_or(DEFAULT_PEN_STROKE_WIDTH),
            },
            other => {
                tracing::warn!(kind = ?other, "unknown item type, treating as text");
                ItemKind::Text {
                    content: record.content.unwrap_or_default(),
                }
            }
        };
        Self {
            id: record.id.unwrap_or_else(Uuid::new_v4),
            x: record.x.unwrap_or(0.0),
            y: record.y.unwrap_or(0.0),
            width: record.width.unwrap_or(DEFAULT_ITEM_WIDTH),
            height: record.height.unwrap_or(DEFAULT_ITEM_HEIGHT),
            z_index: record.z_index.unwrap_or(DEFAULT_Z_INDEX),
            kind,
        }
    }
}

/// Flat wire shape of a canvas item. Every field is optional so partial and
/// legacy records still parse; [`CanvasItem::from_record`] supplies defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<Vec<Stroke>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

/// Sparse geometry update for an item. Only present fields are applied.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

impl PartialItem {
    /// A position-only update.
    #[must_use]
    pub fn at(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Self::default() }
    }

    /// A size-only update.
    #[must_use]
    pub fn sized(width: f64, height: f64) -> Self {
        Self { width: Some(width), height: Some(height), ..Self::default() }
    }

    /// A stacking-order-only update.
    #[must_use]
    pub fn stacked(z_index: i64) -> Self {
        Self { z_index: Some(z_index), ..Self::default() }
    }
}

/// Render a stroke's points as an SVG path `d` string. Strokes with fewer
/// than two points produce no geometry.
#[must_use]
pub fn stroke_to_svg_path(points: &[PathPoint]) -> String {
    let Some((first, rest)) = points.split_first() else {
        return String::new();
    };
    if rest.is_empty() {
        return String::new();
    }
    let mut d = format!("M {} {}", first.x, first.y);
    for p in rest {
        d.push_str(&format!(" L {} {}", p.x, p.y));
    }
    d
}
