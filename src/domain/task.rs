use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::board::ColumnId;

/// Unique identifier for a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single work item belonging to exactly one column.
///
/// `order` is the task's 1-based rank among its column siblings and
/// `column` must always name the column whose task sequence contains it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub order: u32,
    pub column: ColumnId,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task in the given column at the given rank
    pub fn new(column: ColumnId, title: impl Into<String>, order: u32) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: None,
            order,
            column,
            created_at: Utc::now(),
        }
    }

    /// Sets the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_fields() {
        let column = ColumnId::new();
        let task = Task::new(column, "Write release notes", 3);

        assert_eq!(task.title, "Write release notes");
        assert_eq!(task.order, 3);
        assert_eq!(task.column, column);
        assert!(task.description.is_none());
    }

    #[test]
    fn test_with_description() {
        let task = Task::new(ColumnId::new(), "Deploy", 1).with_description("Staging first");
        assert_eq!(task.description.as_deref(), Some("Staging first"));
    }

    #[test]
    fn test_task_id_serde_transparent() {
        let id = TaskId::new();
        let json = serde_json::to_string(&id).unwrap();
        let back: TaskId = serde_json::from_str(&json).unwrap();

        assert_eq!(back, id);
        // Serializes as a bare UUID string, not a wrapper object
        assert!(json.starts_with('"'));
    }
}
