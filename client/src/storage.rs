//! Storage client: projects and items to/from persisted memo blobs.
//!
//! Each project persists as one memo whose `content` is an opaque JSON
//! string of shape `{project: {...}, items: [...]}`. Loads are tolerant by
//! design: unparseable or legacy-shaped content degrades to placeholders or
//! empty canvases with a logged warning, never a crash — the list view must
//! stay available even when individual memos are corrupt.
//!
//! [`MemoStore`] abstracts the memo backend: [`RemoteMemoStore`] speaks the
//! REST memo API through [`ApiClient`]; [`MemoryMemoStore`] is the local
//! fallback used by early revisions and by tests.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use uuid::Uuid;

use canvas::item::ItemRecord;
use canvas::project::Project;

use crate::api::ApiClient;
use crate::error::ClientError;

/// Name given to a project synthesized from a memo whose content could not
/// be parsed at all.
pub const CORRUPTED_PROJECT_NAME: &str = "corrupted data";

/// One memo record as stored by the remote API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoRecord {
    pub memo_id: String,
    pub content: String,
}

/// The JSON document persisted inside a memo's `content` string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FullData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(default)]
    pub items: Vec<ItemRecord>,
}

/// Backend holding memo records keyed by id.
pub trait MemoStore: Send + Sync {
    /// All memos visible to the current session.
    fn list_memos(&self) -> impl Future<Output = Result<Vec<MemoRecord>, ClientError>> + Send;

    /// One memo by id; `Ok(None)` when it doesn't exist.
    fn get_memo(&self, memo_id: &str) -> impl Future<Output = Result<Option<MemoRecord>, ClientError>> + Send;

    /// Idempotent upsert.
    fn put_memo(&self, memo_id: &str, content: &str) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Remove a memo. Removing an absent memo is not an error.
    fn delete_memo(&self, memo_id: &str) -> impl Future<Output = Result<(), ClientError>> + Send;
}

// =============================================================================
// REMOTE STORE
// =============================================================================

/// Memo backend speaking the REST memo API.
#[derive(Clone)]
pub struct RemoteMemoStore {
    api: ApiClient,
}

impl RemoteMemoStore {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[derive(Deserialize)]
struct MemoListResponse {
    memos: Vec<MemoRecord>,
}

impl MemoStore for RemoteMemoStore {
    async fn list_memos(&self) -> Result<Vec<MemoRecord>, ClientError> {
        let body = self
            .api
            .request(Method::GET, "/memos", None)
            .await?
            .unwrap_or(Value::Null);
        let list: MemoListResponse = serde_json::from_value(body)?;
        Ok(list.memos)
    }

    async fn get_memo(&self, memo_id: &str) -> Result<Option<MemoRecord>, ClientError> {
        let path = format!("/memos/{memo_id}");
        match self.api.request(Method::GET, &path, None).await {
            Ok(Some(body)) => Ok(Some(serde_json::from_value(body)?)),
            Ok(None) => Ok(None),
            Err(ClientError::Api { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn put_memo(&self, memo_id: &str, content: &str) -> Result<(), ClientError> {
        let path = format!("/memos/{memo_id}");
        let body = json!({ "content": content });
        self.api.request(Method::PUT, &path, Some(&body)).await?;
        Ok(())
    }

    async fn delete_memo(&self, memo_id: &str) -> Result<(), ClientError> {
        let path = format!("/memos/{memo_id}");
        self.api.request(Method::DELETE, &path, None).await?;
        Ok(())
    }
}

// =============================================================================
// LOCAL / IN-MEMORY STORE
// =============================================================================

/// Local memo backend: the same logical shapes held in process memory
/// instead of behind the remote API. Early revisions persisted this way in
/// browser local storage; tests use it as the session's storage double.
#[derive(Default)]
pub struct MemoryMemoStore {
    memos: Mutex<HashMap<String, String>>,
    puts: AtomicUsize,
}

impl MemoryMemoStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a memo directly, bypassing the put counter.
    pub fn seed(&self, memo_id: &str, content: &str) {
        if let Ok(mut memos) = self.memos.lock() {
            memos.insert(memo_id.to_owned(), content.to_owned());
        }
    }

    /// Number of `put_memo` calls observed. Used to assert save coalescing.
    #[must_use]
    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, ClientError> {
        self.memos
            .lock()
            .map_err(|_| ClientError::Validation("memo store lock poisoned".to_owned()))
    }
}

impl MemoStore for MemoryMemoStore {
    async fn list_memos(&self) -> Result<Vec<MemoRecord>, ClientError> {
        let memos = self.locked()?;
        Ok(memos
            .iter()
            .map(|(memo_id, content)| MemoRecord {
                memo_id: memo_id.clone(),
                content: content.clone(),
            })
            .collect())
    }

    async fn get_memo(&self, memo_id: &str) -> Result<Option<MemoRecord>, ClientError> {
        let memos = self.locked()?;
        Ok(memos.get(memo_id).map(|content| MemoRecord {
            memo_id: memo_id.to_owned(),
            content: content.clone(),
        }))
    }

    async fn put_memo(&self, memo_id: &str, content: &str) -> Result<(), ClientError> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        let mut memos = self.locked()?;
        memos.insert(memo_id.to_owned(), content.to_owned());
        Ok(())
    }

    async fn delete_memo(&self, memo_id: &str) -> Result<(), ClientError> {
        let mut memos = self.locked()?;
        memos.remove(memo_id);
        Ok(())
    }
}

// =============================================================================
// STORAGE CLIENT
// =============================================================================

/// Project/item persistence over a memo backend.
pub struct Storage<S> {
    store: S,
}

impl<S: MemoStore> Storage<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying memo backend.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All project metadata. Never fails: backend and parse failures degrade
    /// to an empty list or per-memo placeholders, with warnings logged.
    pub async fn load_projects(&self) -> Vec<Project> {
        let memos = match self.store.list_memos().await {
            Ok(memos) => memos,
            Err(e) => {
                tracing::warn!(error = %e, "listing memos failed");
                return Vec::new();
            }
        };
        memos.iter().map(project_from_memo).collect()
    }

    /// Full persisted data for one project, or `None` on any fetch or parse
    /// failure (logged, never raised).
    pub async fn load_full_data(&self, project_id: Uuid) -> Option<FullData> {
        let memo = match self.store.get_memo(&project_id.to_string()).await {
            Ok(memo) => memo?,
            Err(e) => {
                tracing::warn!(%project_id, error = %e, "loading project data failed");
                return None;
            }
        };
        match parse_full_data(&memo.content) {
            Some(data) => Some(data),
            None => {
                tracing::warn!(%project_id, "stored content is not valid project data");
                None
            }
        }
    }

    /// Persist a project's metadata and full item collection as one upsert.
    ///
    /// # Errors
    ///
    /// Propagates backend failures; callers on the auto-save path log them,
    /// explicit-save callers surface them.
    pub async fn save_full_data(
        &self,
        project_id: Uuid,
        meta: &Project,
        items: &[ItemRecord],
    ) -> Result<(), ClientError> {
        let data = FullData {
            project: Some(meta.clone()),
            items: items.to_vec(),
        };
        let content = serde_json::to_string(&data)?;
        self.store.put_memo(&project_id.to_string(), &content).await
    }

    /// Update a project's metadata while preserving its persisted items.
    ///
    /// Read-modify-write without a version token: a rename racing an
    /// auto-save is last-writer-wins at whole-blob granularity.
    ///
    /// # Errors
    ///
    /// Propagates backend failures from the final write.
    pub async fn update_project_meta(&self, project: &Project) -> Result<(), ClientError> {
        let items = self
            .load_full_data(project.id)
            .await
            .map(|data| data.items)
            .unwrap_or_default();
        self.save_full_data(project.id, project, &items).await
    }

    /// Remove the persisted record for a project.
    ///
    /// # Errors
    ///
    /// Propagates backend failures.
    pub async fn delete_project(&self, project_id: Uuid) -> Result<(), ClientError> {
        self.store.delete_memo(&project_id.to_string()).await
    }
}

// =============================================================================
// TOLERANT PARSING
// =============================================================================

/// Parse a memo's content string into [`FullData`], accepting legacy shapes.
/// Returns `None` only when the content is not valid JSON.
#[must_use]
pub fn parse_full_data(content: &str) -> Option<FullData> {
    let value: Value = serde_json::from_str(content).ok()?;
    let project = value.get("project").and_then(parse_project_lenient);
    let items = value
        .get("items")
        .and_then(Value::as_array)
        .map(|records| {
            records
                .iter()
                .filter_map(|record| match serde_json::from_value::<ItemRecord>(record.clone()) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        tracing::warn!(error = %e, "skipping malformed item record");
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    Some(FullData { project, items })
}

/// Recover project metadata from a memo, degrading shape by shape: a
/// `project` field, then the raw object itself if it looks like project
/// metadata, then a placeholder keyed by the memo id.
fn project_from_memo(memo: &MemoRecord) -> Project {
    if let Ok(value) = serde_json::from_str::<Value>(&memo.content) {
        if let Some(project) = value.get("project").and_then(parse_project_lenient) {
            return project;
        }
        if let Some(project) = parse_project_lenient(&value) {
            return project;
        }
    }
    tracing::warn!(memo_id = %memo.memo_id, "memo content unreadable, listing placeholder");
    let id = Uuid::parse_str(&memo.memo_id).unwrap_or(Uuid::nil());
    Project::placeholder(id, CORRUPTED_PROJECT_NAME)
}

/// Accept any object carrying at least a parseable `id` and a `name`;
/// absent timestamps become "now" so list ordering still works.
fn parse_project_lenient(value: &Value) -> Option<Project> {
    if let Ok(project) = serde_json::from_value::<Project>(value.clone()) {
        return Some(project);
    }
    let id = value.get("id").and_then(Value::as_str)?;
    let id = Uuid::parse_str(id).ok()?;
    let name = value.get("name").and_then(Value::as_str)?;
    let parse_ts = |key: &str| -> DateTime<Utc> {
        value
            .get(key)
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Utc::now)
    };
    Some(Project {
        id,
        name: name.to_owned(),
        created_at: parse_ts("createdAt"),
        updated_at: parse_ts("updatedAt"),
    })
}
