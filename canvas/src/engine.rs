//! The interaction engine: pointer events in, item mutations and actions out.
//!
//! `EngineCore` owns the item store, the camera, and the gesture state
//! machine for one open canvas. Handlers return [`Action`]s describing what
//! the host must do next — persist a mutation, schedule a save, open a text
//! editor, repaint — instead of firing side effects on their own.
//!
//! Save urgency follows the user's commit points: continuous-gesture
//! releases (drag, resize) and deletions save immediately, while content
//! edits and item creation coalesce through the debounced auto-save.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use crate::camera::{Camera, Point};
use crate::hit::{self, Region};
use crate::input::{Button, InputState, Modifiers, WheelDelta};
use crate::item::{CanvasItem, ItemId, PartialItem, PathPoint};
use crate::store::ItemStore;

/// How soon a requested save must happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveUrgency {
    /// Coalesce through the auto-save quiet period.
    Debounced,
    /// Persist now; losing this mutation on a crash would surprise the user.
    Immediate,
}

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone)]
pub enum Action {
    /// A new item entered the store.
    ItemCreated(CanvasItem),
    /// An existing item's geometry changed.
    ItemUpdated { id: ItemId, fields: PartialItem },
    /// An item left the store.
    ItemDeleted { id: ItemId },
    /// A completed stroke was appended to a pen item.
    StrokeAdded { id: ItemId },
    /// The host should focus a text editor on this item.
    TextEditRequested { id: ItemId },
    /// The host should open its image file picker; the chosen file becomes
    /// an image item at this canvas-space point.
    ImagePickRequested { at: Point },
    /// The host should open its OCR file picker; the extracted text becomes
    /// a text item at this canvas-space point.
    OcrPickRequested { at: Point },
    /// The session should persist the canvas.
    Save(SaveUrgency),
    /// The scene changed visually; repaint.
    RenderNeeded,
}

/// Core engine state for one open canvas session.
///
/// Camera and gesture state live here — never in ambient/global state — and
/// share the lifetime of the open canvas.
#[derive(Default)]
pub struct EngineCore {
    pub store: ItemStore,
    pub camera: Camera,
    pub input: InputState,
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydrate the store from persisted items and reset the camera to
    /// identity (camera state is per-session, never persisted).
    pub fn load_snapshot(&mut self, items: Vec<CanvasItem>) {
        self.store.load_snapshot(items);
        self.camera.reset();
        self.input = InputState::Idle;
    }

    /// Handle a primary-button pointer-down: starts at most one gesture.
    pub fn on_pointer_down(
        &mut self,
        screen_pt: Point,
        button: Button,
        _modifiers: Modifiers,
    ) -> Vec<Action> {
        if button != Button::Primary || !matches!(self.input, InputState::Idle) {
            return Vec::new();
        }
        match hit::hit_test(screen_pt, &self.store, &self.camera) {
            Some(hit) => match hit.region {
                Region::DeleteButton => self.delete_item(&hit.id),
                Region::Header => {
                    let Some(item) = self.store.get(&hit.id) else {
                        return Vec::new();
                    };
                    self.input = InputState::Dragging {
                        id: hit.id,
                        start_screen: screen_pt,
                        orig_x: item.x,
                        orig_y: item.y,
                    };
                    Vec::new()
                }
                Region::ResizeHandle => {
                    let Some(item) = self.store.get(&hit.id) else {
                        return Vec::new();
                    };
                    self.input = InputState::Resizing {
                        id: hit.id,
                        start_screen: screen_pt,
                        orig_w: item.width,
                        orig_h: item.height,
                    };
                    Vec::new()
                }
                Region::Body => {
                    let Some(item) = self.store.get(&hit.id) else {
                        return Vec::new();
                    };
                    if item.is_pen() {
                        let canvas_pt = self.camera.screen_to_canvas(screen_pt);
                        let local = PathPoint::new(canvas_pt.x - item.x, canvas_pt.y - item.y);
                        self.input = InputState::Drawing { id: hit.id, points: vec![local] };
                    }
                    Vec::new()
                }
            },
            None => {
                self.input = InputState::Panning {
                    start_screen: screen_pt,
                    orig_cam_x: self.camera.x,
                    orig_cam_y: self.camera.y,
                };
                Vec::new()
            }
        }
    }

    /// Handle pointer movement: updates the live gesture, if any.
    ///
    /// Drag and resize update the item's visual geometry continuously but
    /// commit (emit `ItemUpdated` + save) only on release, bounding
    /// persisted-state churn during continuous gestures.
    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Dragging { id, start_screen, orig_x, orig_y } => {
                let dx = (screen_pt.x - start_screen.x) / self.camera.scale;
                let dy = (screen_pt.y - start_screen.y) / self.camera.scale;
                let update = PartialItem::at(*orig_x + dx, *orig_y + dy);
                let id = *id;
                self.store.apply_partial(&id, &update);
                vec![Action::RenderNeeded]
            }
            InputState::Resizing { id, start_screen, orig_w, orig_h } => {
                let dx = (screen_pt.x - start_screen.x) / self.camera.scale;
                let dy = (screen_pt.y - start_screen.y) / self.camera.scale;
                let update = PartialItem::sized(*orig_w + dx, *orig_h + dy);
                let id = *id;
                self.store.apply_partial(&id, &update);
                vec![Action::RenderNeeded]
            }
            InputState::Panning { start_screen, orig_cam_x, orig_cam_y } => {
                self.camera.x = *orig_cam_x + (screen_pt.x - start_screen.x);
                self.camera.y = *orig_cam_y + (screen_pt.y - start_screen.y);
                vec![Action::RenderNeeded]
            }
            InputState::Drawing { id, points } => {
                let canvas_pt = self.camera.screen_to_canvas(screen_pt);
                let Some(item) = self.store.get(id) else {
                    return Vec::new();
                };
                points.push(PathPoint::new(canvas_pt.x - item.x, canvas_pt.y - item.y));
                vec![Action::RenderNeeded]
            }
        }
    }

    /// Handle pointer release: commits the live gesture.
    pub fn on_pointer_up(
        &mut self,
        _screen_pt: Point,
        _button: Button,
        _modifiers: Modifiers,
    ) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle | InputState::Panning { .. } => Vec::new(),
            InputState::Dragging { id, .. } => {
                let Some(item) = self.store.get(&id) else {
                    return Vec::new();
                };
                vec![
                    Action::ItemUpdated { id, fields: PartialItem::at(item.x, item.y) },
                    Action::Save(SaveUrgency::Immediate),
                ]
            }
            InputState::Resizing { id, .. } => {
                let Some(item) = self.store.get(&id) else {
                    return Vec::new();
                };
                vec![
                    Action::ItemUpdated { id, fields: PartialItem::sized(item.width, item.height) },
                    Action::Save(SaveUrgency::Immediate),
                ]
            }
            InputState::Drawing { id, points } => {
                // A click without movement produces no stroke.
                if points.len() < 2 {
                    return Vec::new();
                }
                let Some(item) = self.store.get(&id) else {
                    return Vec::new();
                };
                let Some(stroke) = item.stroke_from_points(points) else {
                    return Vec::new();
                };
                if let Some(item) = self.store.get_mut(&id) {
                    item.add_stroke(stroke);
                }
                vec![
                    Action::StrokeAdded { id },
                    Action::Save(SaveUrgency::Debounced),
                    Action::RenderNeeded,
                ]
            }
        }
    }

    /// Handle a wheel event: zoom anchored at the cursor.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        self.camera.zoom_at(screen_pt, delta.dy);
        vec![Action::RenderNeeded]
    }

    /// Handle a double-click: on empty background, create a text note at the
    /// canvas-space point and hand it to the host's editor.
    pub fn on_double_click(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        if hit::hit_test(screen_pt, &self.store, &self.camera).is_some() {
            return Vec::new();
        }
        let canvas_pt = self.camera.screen_to_canvas(screen_pt);
        let item = CanvasItem::text(canvas_pt.x, canvas_pt.y, "");
        let id = item.id;
        self.store.insert(item.clone());
        vec![
            Action::ItemCreated(item),
            Action::TextEditRequested { id },
            Action::Save(SaveUrgency::Debounced),
            Action::RenderNeeded,
        ]
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Remove an item and request an immediate save. No-op for unknown ids:
    /// deletions race with remote reloads and must stay idempotent.
    pub fn delete_item(&mut self, id: &ItemId) -> Vec<Action> {
        if self.store.remove(id).is_none() {
            return Vec::new();
        }
        vec![
            Action::ItemDeleted { id: *id },
            Action::Save(SaveUrgency::Immediate),
            Action::RenderNeeded,
        ]
    }
}
