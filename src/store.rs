/// External task-store collaborator: the only boundary of the engine.
///
/// Implementations wrap the remote REST backend (or a test double).
/// Transport and wire format belong to the implementation, not here.
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{Card, ColumnId, Priority};

/// A backend category, the server-side entity behind a board column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A task as returned by the backend listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Backend category reference; `None` lands the task in the
    /// synthetic Uncategorized column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_to: Vec<String>,
}

impl TaskRecord {
    /// Convert into the board-facing card shape. The category
    /// reference is dropped here: column membership carries it.
    pub fn into_card(self) -> Card {
        Card {
            id: self.id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            assignees: self.assigned_to,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    #[error("Backend rejected request: {0}")]
    Rejected(String),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Abstract task-store trait for board backends.
/// Implementations: REST client (production), mocks (tests).
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Fetch the categories and tasks of a project in one shot.
    /// Category order is the column order of the loaded board.
    async fn list_categories_and_tasks(
        &self,
        project_id: &str,
    ) -> Result<(Vec<Category>, Vec<TaskRecord>), StoreError>;

    /// Set a task's category to the given column. `Uncategorized`
    /// clears the category. Idempotent: repeating the call with the
    /// same arguments yields the same end state.
    async fn set_task_category(
        &self,
        task_id: &str,
        column: &ColumnId,
    ) -> Result<(), StoreError>;

    /// Create a new category; the backend mints the id.
    async fn create_category(&self, name: &str) -> Result<Category, StoreError>;
}
