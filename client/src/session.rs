//! The open-canvas session: one project's engine wired to persistence.
//!
//! `CanvasSession` owns the engine state behind an async lock and interprets
//! the [`Action`]s the engine emits. Save requests come in two urgencies:
//! immediate saves run right away (after cancelling any pending timer),
//! debounced saves re-arm a single quiet-period timer so that a burst of
//! edits collapses into one write [`AUTOSAVE_QUIET_MS`] after the last one.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use uuid::Uuid;

use canvas::camera::{Camera, Point};
use canvas::engine::{Action, EngineCore, SaveUrgency};
use canvas::input::{Button, Modifiers, WheelDelta};
use canvas::item::{CanvasItem, ItemId, ItemRecord, PartialItem};
use canvas::menu::{self, MenuAction, MenuTarget};
use canvas::project::{DEFAULT_PROJECT_NAME, Project};

use crate::error::ClientError;
use crate::storage::{MemoStore, Storage};

/// Quiet period between the last debounced mutation and the auto-save write.
pub const AUTOSAVE_QUIET_MS: u64 = 2000;

struct OpenCanvas {
    engine: EngineCore,
    project: Option<Project>,
}

/// One open project's canvas, its engine state, and its auto-save timer.
///
/// Clones share the same canvas and timer slot; the session is cheap to hand
/// to spawned tasks.
pub struct CanvasSession<S> {
    canvas: Arc<tokio::sync::Mutex<OpenCanvas>>,
    storage: Arc<Storage<S>>,
    autosave: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl<S> Clone for CanvasSession<S> {
    fn clone(&self) -> Self {
        Self {
            canvas: Arc::clone(&self.canvas),
            storage: Arc::clone(&self.storage),
            autosave: Arc::clone(&self.autosave),
        }
    }
}

impl<S: MemoStore + 'static> CanvasSession<S> {
    #[must_use]
    pub fn new(storage: Arc<Storage<S>>) -> Self {
        Self {
            canvas: Arc::new(tokio::sync::Mutex::new(OpenCanvas {
                engine: EngineCore::new(),
                project: None,
            })),
            storage,
            autosave: Arc::new(Mutex::new(None)),
        }
    }

    /// Open a project, replacing whatever was loaded before.
    ///
    /// Fail-soft: a missing or unreadable memo opens as an empty canvas with
    /// placeholder metadata so the user can keep working; the next save
    /// writes a well-formed record.
    pub async fn load_project(&self, project_id: Uuid) {
        self.cancel_pending();
        let data = self.storage.load_full_data(project_id).await;
        let mut canvas = self.canvas.lock().await;
        match data {
            Some(data) => {
                let items = data.items.into_iter().map(CanvasItem::from_record).collect();
                canvas.engine.load_snapshot(items);
                canvas.project = Some(
                    data.project
                        .unwrap_or_else(|| Project::placeholder(project_id, DEFAULT_PROJECT_NAME)),
                );
            }
            None => {
                tracing::warn!(%project_id, "project data unavailable, opening empty canvas");
                canvas.engine.load_snapshot(Vec::new());
                canvas.project = Some(Project::placeholder(project_id, DEFAULT_PROJECT_NAME));
            }
        }
    }

    /// The open project's metadata, if a project is loaded.
    pub async fn project(&self) -> Option<Project> {
        self.canvas.lock().await.project.clone()
    }

    /// Current items in stacking order.
    pub async fn items(&self) -> Vec<CanvasItem> {
        let canvas = self.canvas.lock().await;
        canvas.engine.store.sorted_items().into_iter().cloned().collect()
    }

    /// Current camera state.
    pub async fn camera(&self) -> Camera {
        self.canvas.lock().await.engine.camera()
    }

    // -------------------------------------------------------------------------
    // Pointer and menu routing
    // -------------------------------------------------------------------------

    /// Route a pointer-down through the engine and dispatch its actions.
    ///
    /// # Errors
    ///
    /// Propagates immediate-save failures.
    pub async fn pointer_down(
        &self,
        at: Point,
        button: Button,
        modifiers: Modifiers,
    ) -> Result<Vec<Action>, ClientError> {
        let actions = {
            let mut canvas = self.canvas.lock().await;
            canvas.engine.on_pointer_down(at, button, modifiers)
        };
        self.dispatch(&actions).await?;
        Ok(actions)
    }

    /// Route a pointer-move through the engine and dispatch its actions.
    ///
    /// # Errors
    ///
    /// Propagates immediate-save failures.
    pub async fn pointer_move(&self, at: Point, modifiers: Modifiers) -> Result<Vec<Action>, ClientError> {
        let actions = {
            let mut canvas = self.canvas.lock().await;
            canvas.engine.on_pointer_move(at, modifiers)
        };
        self.dispatch(&actions).await?;
        Ok(actions)
    }

    /// Route a pointer-up through the engine and dispatch its actions.
    ///
    /// # Errors
    ///
    /// Propagates immediate-save failures (drag and resize commit here).
    pub async fn pointer_up(
        &self,
        at: Point,
        button: Button,
        modifiers: Modifiers,
    ) -> Result<Vec<Action>, ClientError> {
        let actions = {
            let mut canvas = self.canvas.lock().await;
            canvas.engine.on_pointer_up(at, button, modifiers)
        };
        self.dispatch(&actions).await?;
        Ok(actions)
    }

    /// Route a wheel event (zoom) through the engine.
    ///
    /// # Errors
    ///
    /// Propagates immediate-save failures; zooming itself never saves.
    pub async fn wheel(
        &self,
        at: Point,
        delta: WheelDelta,
        modifiers: Modifiers,
    ) -> Result<Vec<Action>, ClientError> {
        let actions = {
            let mut canvas = self.canvas.lock().await;
            canvas.engine.on_wheel(at, delta, modifiers)
        };
        self.dispatch(&actions).await?;
        Ok(actions)
    }

    /// Route a double-click (text creation on background) through the engine.
    ///
    /// # Errors
    ///
    /// Propagates immediate-save failures.
    pub async fn double_click(&self, at: Point, modifiers: Modifiers) -> Result<Vec<Action>, ClientError> {
        let actions = {
            let mut canvas = self.canvas.lock().await;
            canvas.engine.on_double_click(at, modifiers)
        };
        self.dispatch(&actions).await?;
        Ok(actions)
    }

    /// Resolve what a context menu at this screen point targets.
    pub async fn menu_target(&self, at: Point) -> MenuTarget {
        let canvas = self.canvas.lock().await;
        menu::target_at(&canvas.engine, at)
    }

    /// Apply a context-menu action and dispatch the resulting actions.
    ///
    /// # Errors
    ///
    /// Propagates immediate-save failures (restack and delete commit here).
    pub async fn menu_action(
        &self,
        target: MenuTarget,
        action: MenuAction,
        at: Point,
    ) -> Result<Vec<Action>, ClientError> {
        let actions = {
            let mut canvas = self.canvas.lock().await;
            menu::apply(&mut canvas.engine, target, action, at)
        };
        self.dispatch(&actions).await?;
        Ok(actions)
    }

    // -------------------------------------------------------------------------
    // Direct mutations
    // -------------------------------------------------------------------------

    /// Insert a new item and schedule a debounced save.
    pub async fn add_item(&self, item: CanvasItem) -> ItemId {
        let id = item.id;
        {
            let mut canvas = self.canvas.lock().await;
            canvas.engine.store.insert(item);
        }
        self.schedule_autosave();
        id
    }

    /// Insert a text item holding OCR output, sized for extracted text.
    pub async fn add_ocr_text_item(&self, text: &str, at: Point) -> ItemId {
        self.add_item(CanvasItem::ocr_text(at.x, at.y, text)).await
    }

    /// Remove an item and save immediately. Unknown ids are a silent no-op.
    ///
    /// # Errors
    ///
    /// Propagates the immediate save's failure.
    pub async fn remove_item(&self, id: &ItemId) -> Result<(), ClientError> {
        let removed = {
            let mut canvas = self.canvas.lock().await;
            canvas.engine.store.remove(id).is_some()
        };
        if removed {
            self.cancel_pending();
            self.save().await?;
        }
        Ok(())
    }

    /// Apply a sparse geometry update and save immediately.
    ///
    /// # Errors
    ///
    /// Propagates the immediate save's failure.
    pub async fn update_item(&self, id: &ItemId, fields: &PartialItem) -> Result<(), ClientError> {
        let changed = {
            let mut canvas = self.canvas.lock().await;
            canvas.engine.store.apply_partial(id, fields)
        };
        if changed {
            self.cancel_pending();
            self.save().await?;
        }
        Ok(())
    }

    /// Replace a text item's content and schedule a debounced save.
    pub async fn set_text_content(&self, id: &ItemId, content: &str) {
        let changed = {
            let mut canvas = self.canvas.lock().await;
            canvas.engine.store.set_text_content(id, content)
        };
        if changed {
            self.schedule_autosave();
        }
    }

    /// Raise an item above all others and save immediately.
    ///
    /// # Errors
    ///
    /// Propagates the immediate save's failure.
    pub async fn bring_to_front(&self, id: &ItemId) -> Result<(), ClientError> {
        let moved = {
            let mut canvas = self.canvas.lock().await;
            canvas.engine.store.bring_to_front(id).is_some()
        };
        if moved {
            self.cancel_pending();
            self.save().await?;
        }
        Ok(())
    }

    /// Lower an item below all others and save immediately.
    ///
    /// # Errors
    ///
    /// Propagates the immediate save's failure.
    pub async fn send_to_back(&self, id: &ItemId) -> Result<(), ClientError> {
        let moved = {
            let mut canvas = self.canvas.lock().await;
            canvas.engine.store.send_to_back(id).is_some()
        };
        if moved {
            self.cancel_pending();
            self.save().await?;
        }
        Ok(())
    }

    /// Rename the open project and save immediately.
    ///
    /// # Errors
    ///
    /// Propagates the immediate save's failure.
    pub async fn rename_project(&self, name: &str) -> Result<(), ClientError> {
        {
            let mut canvas = self.canvas.lock().await;
            let Some(project) = canvas.project.as_mut() else {
                return Ok(());
            };
            let trimmed = name.trim();
            project.name = if trimmed.is_empty() {
                DEFAULT_PROJECT_NAME.to_owned()
            } else {
                trimmed.to_owned()
            };
        }
        self.cancel_pending();
        self.save().await
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// Persist the open canvas now, refreshing the project's `updatedAt`.
    ///
    /// A session with no loaded project logs and succeeds; there is nothing
    /// to write yet.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn save(&self) -> Result<(), ClientError> {
        // Serialize under the lock, write after releasing it.
        let snapshot = {
            let mut canvas = self.canvas.lock().await;
            let Some(project) = canvas.project.as_mut() else {
                tracing::warn!("save requested with no project loaded");
                return Ok(());
            };
            project.touch();
            let meta = project.clone();
            let records: Vec<ItemRecord> = canvas
                .engine
                .store
                .sorted_items()
                .into_iter()
                .map(CanvasItem::to_record)
                .collect();
            (meta, records)
        };
        let (meta, records) = snapshot;
        self.storage.save_full_data(meta.id, &meta, &records).await
    }

    /// Cancel any pending auto-save and persist now. Call before closing the
    /// canvas or signing out.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn flush(&self) -> Result<(), ClientError> {
        self.cancel_pending();
        self.save().await
    }

    /// Interpret engine actions: the strongest save request wins.
    async fn dispatch(&self, actions: &[Action]) -> Result<(), ClientError> {
        let mut urgency = None;
        for action in actions {
            if let Action::Save(u) = action {
                if *u == SaveUrgency::Immediate || urgency.is_none() {
                    urgency = Some(*u);
                }
            }
        }
        match urgency {
            Some(SaveUrgency::Immediate) => {
                self.cancel_pending();
                self.save().await
            }
            Some(SaveUrgency::Debounced) => {
                self.schedule_autosave();
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Re-arm the auto-save timer: the pending write (if any) is aborted and
    /// a fresh quiet period starts now.
    fn schedule_autosave(&self) {
        let session = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(AUTOSAVE_QUIET_MS)).await;
            if let Err(e) = session.save().await {
                tracing::error!(error = %e, "auto-save failed");
            }
        });
        if let Ok(mut slot) = self.autosave.lock() {
            if let Some(pending) = slot.replace(handle) {
                pending.abort();
            }
        }
    }

    fn cancel_pending(&self) {
        if let Ok(mut slot) = self.autosave.lock() {
            if let Some(pending) = slot.take() {
                pending.abort();
            }
        }
    }
}
