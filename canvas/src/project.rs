//! Project metadata: a named workspace holding one canvas's worth of items.

#[cfg(test)]
#[path = "project_test.rs"]
mod project_test;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name given to a project created without one.
pub const DEFAULT_PROJECT_NAME: &str = "Untitled Project";

/// Workspace metadata. Owned by the project list; at most one project is
/// open per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a project with a generated id and current timestamps. The name
    /// is trimmed; an empty or whitespace-only name becomes
    /// [`DEFAULT_PROJECT_NAME`].
    #[must_use]
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        let trimmed = name.trim();
        Self {
            id: Uuid::new_v4(),
            name: if trimmed.is_empty() {
                DEFAULT_PROJECT_NAME.to_owned()
            } else {
                trimmed.to_owned()
            },
            created_at: now,
            updated_at: now,
        }
    }

    /// A stand-in for a memo whose content could not be understood, keyed by
    /// the memo's storage id so it stays addressable.
    #[must_use]
    pub fn placeholder(id: Uuid, name: &str) -> Self {
        let now = Utc::now();
        Self { id, name: name.to_owned(), created_at: now, updated_at: now }
    }

    /// Refresh `updated_at`. Called on every rename and canvas save so that
    /// most-recently-updated-first list ordering stays correct.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Sort a project list most-recently-updated first.
    pub fn by_recent_update(projects: &mut [Self]) {
        projects.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    }
}
