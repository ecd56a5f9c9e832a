//! In-memory item collection for the open project.
//!
//! `ItemStore` is the authoritative map from item id to [`CanvasItem`] while
//! a project is open. Data flows in from deserialized storage records and
//! from the input engine (mutations); a renderer reads draw order via
//! [`ItemStore::sorted_items`].

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::HashMap;

use crate::consts::{MIN_ITEM_HEIGHT, MIN_ITEM_WIDTH};
use crate::item::{CanvasItem, ItemId, ItemKind, PartialItem};

/// In-memory store of canvas items, keyed by id.
#[derive(Default)]
pub struct ItemStore {
    items: HashMap<ItemId, CanvasItem>,
}

impl ItemStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an item. An existing item with the same id is
    /// overwritten.
    pub fn insert(&mut self, item: CanvasItem) {
        self.items.insert(item.id, item);
    }

    /// Remove an item by id, returning it if it was present.
    pub fn remove(&mut self, id: &ItemId) -> Option<CanvasItem> {
        self.items.remove(id)
    }

    /// Return a reference to an item by id.
    #[must_use]
    pub fn get(&self, id: &ItemId) -> Option<&CanvasItem> {
        self.items.get(id)
    }

    /// Return a mutable reference to an item by id.
    pub fn get_mut(&mut self, id: &ItemId) -> Option<&mut CanvasItem> {
        self.items.get_mut(id)
    }

    /// Apply a sparse geometry update. Width and height are clamped to the
    /// minimum item size regardless of the requested shrink. Returns `false`
    /// if the item doesn't exist.
    pub fn apply_partial(&mut self, id: &ItemId, partial: &PartialItem) -> bool {
        let Some(item) = self.items.get_mut(id) else {
            return false;
        };
        if let Some(x) = partial.x {
            item.x = x;
        }
        if let Some(y) = partial.y {
            item.y = y;
        }
        if let Some(w) = partial.width {
            item.width = w.max(MIN_ITEM_WIDTH);
        }
        if let Some(h) = partial.height {
            item.height = h.max(MIN_ITEM_HEIGHT);
        }
        if let Some(z) = partial.z_index {
            item.z_index = z;
        }
        true
    }

    /// Replace the text content of a text item. Returns `false` if the item
    /// doesn't exist or is not a text item.
    pub fn set_text_content(&mut self, id: &ItemId, content: impl Into<String>) -> bool {
        match self.items.get_mut(id) {
            Some(item) => match &mut item.kind {
                ItemKind::Text { content: existing } => {
                    *existing = content.into();
                    true
                }
                ItemKind::Image { .. } | ItemKind::Pen { .. } => false,
            },
            None => false,
        }
    }

    /// Raise an item above everything else: its z-index becomes the current
    /// maximum plus one (full scan; item counts stay in the low hundreds).
    /// Returns the new z-index, or `None` if the item doesn't exist.
    pub fn bring_to_front(&mut self, id: &ItemId) -> Option<i64> {
        if !self.items.contains_key(id) {
            return None;
        }
        let max_z = self.items.values().map(|i| i.z_index).max().unwrap_or_default();
        let new_z = max_z + 1;
        if let Some(item) = self.items.get_mut(id) {
            item.z_index = new_z;
        }
        Some(new_z)
    }

    /// Lower an item beneath everything else: current minimum minus one.
    /// Returns the new z-index, or `None` if the item doesn't exist.
    pub fn send_to_back(&mut self, id: &ItemId) -> Option<i64> {
        if !self.items.contains_key(id) {
            return None;
        }
        let min_z = self.items.values().map(|i| i.z_index).min().unwrap_or_default();
        let new_z = min_z - 1;
        if let Some(item) = self.items.get_mut(id) {
            item.z_index = new_z;
        }
        Some(new_z)
    }

    /// Replace all items with a full snapshot.
    pub fn load_snapshot(&mut self, items: Vec<CanvasItem>) {
        self.items.clear();
        for item in items {
            self.items.insert(item.id, item);
        }
    }

    /// Return all items sorted by `(z_index, id)` for draw order.
    #[must_use]
    pub fn sorted_items(&self) -> Vec<&CanvasItem> {
        let mut items: Vec<&CanvasItem> = self.items.values().collect();
        items.sort_by(|a, b| a.z_index.cmp(&b.z_index).then_with(|| a.id.cmp(&b.id)));
        items
    }

    /// Number of items currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the store contains no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
