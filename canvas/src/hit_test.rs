use super::*;
use crate::item::CanvasItem;

fn store_with(items: Vec<CanvasItem>) -> ItemStore {
    let mut store = ItemStore::new();
    for item in items {
        store.insert(item);
    }
    store
}

#[test]
fn background_when_empty() {
    let store = ItemStore::new();
    assert!(hit_test(Point::new(10.0, 10.0), &store, &Camera::default()).is_none());
}

#[test]
fn background_outside_item_bounds() {
    let store = store_with(vec![CanvasItem::text(100.0, 100.0, "")]);
    assert!(hit_test(Point::new(50.0, 50.0), &store, &Camera::default()).is_none());
}

#[test]
fn header_strip_hits_header() {
    let item = CanvasItem::text(100.0, 100.0, "");
    let id = item.id;
    let store = store_with(vec![item]);
    let hit = hit_test(Point::new(110.0, 105.0), &store, &Camera::default()).unwrap();
    assert_eq!(hit.id, id);
    assert_eq!(hit.region, Region::Header);
}

#[test]
fn header_right_edge_hits_delete_button() {
    // Default width 200: delete control spans x in [276, 300] at y <= 28.
    let store = store_with(vec![CanvasItem::text(100.0, 100.0, "")]);
    let hit = hit_test(Point::new(290.0, 110.0), &store, &Camera::default()).unwrap();
    assert_eq!(hit.region, Region::DeleteButton);
}

#[test]
fn bottom_right_corner_hits_resize_handle() {
    // Default size 200x100: handle spans [284, 300] x [184, 200].
    let store = store_with(vec![CanvasItem::text(100.0, 100.0, "")]);
    let hit = hit_test(Point::new(295.0, 195.0), &store, &Camera::default()).unwrap();
    assert_eq!(hit.region, Region::ResizeHandle);
}

#[test]
fn interior_hits_body() {
    let store = store_with(vec![CanvasItem::text(100.0, 100.0, "")]);
    let hit = hit_test(Point::new(150.0, 160.0), &store, &Camera::default()).unwrap();
    assert_eq!(hit.region, Region::Body);
}

#[test]
fn topmost_item_wins_overlap() {
    let mut below = CanvasItem::text(0.0, 0.0, "");
    below.z_index = 1;
    let mut above = CanvasItem::text(50.0, 50.0, "");
    above.z_index = 2;
    let above_id = above.id;
    let store = store_with(vec![below, above]);
    // (60, 90) is inside both; the higher z-index is hit.
    let hit = hit_test(Point::new(60.0, 90.0), &store, &Camera::default()).unwrap();
    assert_eq!(hit.id, above_id);
}

#[test]
fn hit_respects_camera_transform() {
    let item = CanvasItem::text(100.0, 100.0, "");
    let id = item.id;
    let store = store_with(vec![item]);
    let camera = Camera { x: 40.0, y: -10.0, scale: 2.0 };
    // Canvas (150, 160) is body; its screen position is (340, 310).
    let hit = hit_test(Point::new(340.0, 310.0), &store, &camera).unwrap();
    assert_eq!(hit.id, id);
    assert_eq!(hit.region, Region::Body);
}
