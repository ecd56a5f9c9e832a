#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::consts::{DELETE_BUTTON_SIZE, HEADER_HEIGHT, RESIZE_HANDLE_SIZE};
use crate::item::ItemId;
use crate::store::ItemStore;

/// Which region of an item was hit.
///
/// Every item renders a header strip along its top edge (the drag grip,
/// with the delete control at its right end), a resize handle at the
/// bottom-right corner, and a body. A pen item's body is its drawing
/// surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Header,
    DeleteButton,
    ResizeHandle,
    Body,
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub id: ItemId,
    pub region: Region,
}

/// Test which item (if any) is under `screen_pt`. The topmost item by
/// stacking order wins; `None` means the canvas background.
#[must_use]
pub fn hit_test(screen_pt: Point, store: &ItemStore, camera: &Camera) -> Option<Hit> {
    let pt = camera.screen_to_canvas(screen_pt);
    for item in store.sorted_items().into_iter().rev() {
        let lx = pt.x - item.x;
        let ly = pt.y - item.y;
        if lx < 0.0 || ly < 0.0 || lx > item.width || ly > item.height {
            continue;
        }
        let region = if ly <= HEADER_HEIGHT {
            if lx >= item.width - DELETE_BUTTON_SIZE {
                Region::DeleteButton
            } else {
                Region::Header
            }
        } else if lx >= item.width - RESIZE_HANDLE_SIZE && ly >= item.height - RESIZE_HANDLE_SIZE {
            Region::ResizeHandle
        } else {
            Region::Body
        };
        return Some(Hit { id: item.id, region });
    }
    None
}
