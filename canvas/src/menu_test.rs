#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::Camera;
use crate::item::ItemKind;

fn core_with_item(item: CanvasItem) -> EngineCore {
    let mut core = EngineCore::new();
    core.store.insert(item);
    core
}

// --- Targets ---

#[test]
fn target_on_background() {
    let core = EngineCore::new();
    assert_eq!(target_at(&core, Point::new(10.0, 10.0)), MenuTarget::Background);
}

#[test]
fn target_on_item() {
    let item = CanvasItem::text(100.0, 100.0, "");
    let id = item.id;
    let core = core_with_item(item);
    assert_eq!(target_at(&core, Point::new(150.0, 150.0)), MenuTarget::Item(id));
}

// --- Offered actions ---

#[test]
fn background_offers_creation_actions() {
    let actions = available_actions(MenuTarget::Background);
    assert!(actions.contains(&MenuAction::AddText));
    assert!(actions.contains(&MenuAction::AddImage));
    assert!(actions.contains(&MenuAction::AddPen));
    assert!(actions.contains(&MenuAction::AddOcr));
    assert!(!actions.contains(&MenuAction::DeleteItem));
}

#[test]
fn item_offers_reorder_and_delete() {
    let actions = available_actions(MenuTarget::Item(uuid::Uuid::new_v4()));
    assert_eq!(
        actions,
        &[MenuAction::BringToFront, MenuAction::SendToBack, MenuAction::DeleteItem]
    );
}

// --- Creation routes through the camera transform ---

#[test]
fn add_text_places_at_canvas_point() {
    let mut core = EngineCore::new();
    core.camera = Camera { x: 100.0, y: 0.0, scale: 2.0 };
    let actions = apply(&mut core, MenuTarget::Background, MenuAction::AddText, Point::new(300.0, 80.0));

    let item = actions
        .iter()
        .find_map(|a| match a {
            Action::ItemCreated(item) => Some(item.clone()),
            _ => None,
        })
        .unwrap();
    // Screen (300, 80) under this camera is canvas (100, 40).
    assert_eq!(item.x, 100.0);
    assert_eq!(item.y, 40.0);
    assert!(actions.iter().any(|a| matches!(a, Action::TextEditRequested { .. })));
    assert!(actions.iter().any(|a| matches!(a, Action::Save(SaveUrgency::Debounced))));
}

#[test]
fn add_pen_creates_pen_without_text_edit() {
    let mut core = EngineCore::new();
    let actions = apply(&mut core, MenuTarget::Background, MenuAction::AddPen, Point::new(40.0, 60.0));
    let item = actions
        .iter()
        .find_map(|a| match a {
            Action::ItemCreated(item) => Some(item.clone()),
            _ => None,
        })
        .unwrap();
    assert!(matches!(item.kind, ItemKind::Pen { .. }));
    assert!(!actions.iter().any(|a| matches!(a, Action::TextEditRequested { .. })));
}

#[test]
fn add_image_and_ocr_request_pickers_at_canvas_point() {
    let mut core = EngineCore::new();
    core.camera = Camera { x: 10.0, y: 10.0, scale: 1.0 };

    let image = apply(&mut core, MenuTarget::Background, MenuAction::AddImage, Point::new(110.0, 60.0));
    assert!(image.iter().any(|a| matches!(a, Action::ImagePickRequested { at } if at.x == 100.0 && at.y == 50.0)));

    let ocr = apply(&mut core, MenuTarget::Background, MenuAction::AddOcr, Point::new(110.0, 60.0));
    assert!(ocr.iter().any(|a| matches!(a, Action::OcrPickRequested { at } if at.x == 100.0 && at.y == 50.0)));
    assert!(core.store.is_empty());
}

// --- Item actions ---

#[test]
fn bring_to_front_emits_stacking_update() {
    let mut a = CanvasItem::text(0.0, 0.0, "");
    a.z_index = 1;
    let mut b = CanvasItem::text(0.0, 0.0, "");
    b.z_index = 5;
    let a_id = a.id;
    let mut core = EngineCore::new();
    core.store.insert(a);
    core.store.insert(b);

    let actions = apply(&mut core, MenuTarget::Item(a_id), MenuAction::BringToFront, Point::new(0.0, 0.0));
    let z = actions
        .iter()
        .find_map(|a| match a {
            Action::ItemUpdated { fields, .. } => fields.z_index,
            _ => None,
        })
        .unwrap();
    assert_eq!(z, 6);
    assert!(actions.iter().any(|a| matches!(a, Action::Save(SaveUrgency::Immediate))));
}

#[test]
fn delete_via_menu_removes_item() {
    let item = CanvasItem::text(0.0, 0.0, "");
    let id = item.id;
    let mut core = core_with_item(item);
    let actions = apply(&mut core, MenuTarget::Item(id), MenuAction::DeleteItem, Point::new(0.0, 0.0));
    assert!(actions.iter().any(|a| matches!(a, Action::ItemDeleted { id: did } if *did == id)));
    assert!(core.store.is_empty());
}

#[test]
fn mismatched_target_action_is_noop() {
    let mut core = EngineCore::new();
    let actions = apply(&mut core, MenuTarget::Background, MenuAction::DeleteItem, Point::new(0.0, 0.0));
    assert!(actions.is_empty());
}

// --- Toolbar placement ---

#[test]
fn viewport_center_routes_through_camera() {
    let mut core = EngineCore::new();
    core.camera = Camera { x: 0.0, y: 0.0, scale: 2.0 };
    let at = viewport_center(&core, 800.0, 600.0, 300.0, 200.0);
    // Viewport center (400, 300) is canvas (200, 150); item is centered on it.
    assert_eq!(at.x, 50.0);
    assert_eq!(at.y, 50.0);
}
