//! Context-menu and toolbar dispatch.
//!
//! A right-click resolves to a [`MenuTarget`] (empty background or a
//! specific item), which determines the offered [`MenuAction`]s. Applying an
//! action converts the menu's screen coordinate through the inverse camera
//! transform before any item is created, then routes to store mutations and
//! returns the same [`Action`]s the input engine produces.

#[cfg(test)]
#[path = "menu_test.rs"]
mod menu_test;

use crate::camera::Point;
use crate::engine::{Action, EngineCore, SaveUrgency};
use crate::hit;
use crate::item::{CanvasItem, ItemId, PartialItem};

/// What a context menu was opened over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    /// Empty canvas background.
    Background,
    /// An existing item.
    Item(ItemId),
}

/// A discrete user action offered by the context menu or toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    AddText,
    AddImage,
    AddPen,
    AddOcr,
    BringToFront,
    SendToBack,
    DeleteItem,
}

/// Resolve what is under a right-click.
#[must_use]
pub fn target_at(core: &EngineCore, screen_pt: Point) -> MenuTarget {
    match hit::hit_test(screen_pt, &core.store, &core.camera) {
        Some(hit) => MenuTarget::Item(hit.id),
        None => MenuTarget::Background,
    }
}

/// The actions offered for a target: creation entries on the background,
/// reorder/delete entries on an item.
#[must_use]
pub fn available_actions(target: MenuTarget) -> &'static [MenuAction] {
    match target {
        MenuTarget::Background => &[
            MenuAction::AddText,
            MenuAction::AddImage,
            MenuAction::AddPen,
            MenuAction::AddOcr,
        ],
        MenuTarget::Item(_) => &[
            MenuAction::BringToFront,
            MenuAction::SendToBack,
            MenuAction::DeleteItem,
        ],
    }
}

/// Apply a menu action at the menu's screen position.
///
/// Item-targeted actions ignore the position; creation actions place the new
/// item at the equivalent canvas-space point.
pub fn apply(core: &mut EngineCore, target: MenuTarget, action: MenuAction, screen_pt: Point) -> Vec<Action> {
    let at = core.camera.screen_to_canvas(screen_pt);
    match (target, action) {
        (MenuTarget::Background, MenuAction::AddText) => {
            insert_new(core, CanvasItem::text(at.x, at.y, ""), true)
        }
        (MenuTarget::Background, MenuAction::AddPen) => {
            insert_new(core, CanvasItem::pen(at.x, at.y), false)
        }
        (MenuTarget::Background, MenuAction::AddImage) => {
            vec![Action::ImagePickRequested { at }]
        }
        (MenuTarget::Background, MenuAction::AddOcr) => {
            vec![Action::OcrPickRequested { at }]
        }
        (MenuTarget::Item(id), MenuAction::BringToFront) => {
            restack(core, &id, true)
        }
        (MenuTarget::Item(id), MenuAction::SendToBack) => {
            restack(core, &id, false)
        }
        (MenuTarget::Item(id), MenuAction::DeleteItem) => core.delete_item(&id),
        // Target/action mismatch: the menu never offers these pairings.
        _ => Vec::new(),
    }
}

/// Place a toolbar-created item at the center of the viewport, routed
/// through the camera transform like every other creation.
#[must_use]
pub fn viewport_center(core: &EngineCore, viewport_w: f64, viewport_h: f64, item_w: f64, item_h: f64) -> Point {
    let center = core.camera.screen_to_canvas(Point::new(viewport_w / 2.0, viewport_h / 2.0));
    Point::new(center.x - item_w / 2.0, center.y - item_h / 2.0)
}

fn insert_new(core: &mut EngineCore, item: CanvasItem, edit_text: bool) -> Vec<Action> {
    let id = item.id;
    core.store.insert(item.clone());
    let mut actions = vec![Action::ItemCreated(item)];
    if edit_text {
        actions.push(Action::TextEditRequested { id });
    }
    actions.push(Action::Save(SaveUrgency::Debounced));
    actions.push(Action::RenderNeeded);
    actions
}

fn restack(core: &mut EngineCore, id: &ItemId, to_front: bool) -> Vec<Action> {
    let new_z = if to_front {
        core.store.bring_to_front(id)
    } else {
        core.store.send_to_back(id)
    };
    let Some(new_z) = new_z else {
        return Vec::new();
    };
    vec![
        Action::ItemUpdated { id: *id, fields: PartialItem::stacked(new_z) },
        Action::Save(SaveUrgency::Immediate),
        Action::RenderNeeded,
    ]
}
