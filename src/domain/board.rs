use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use crate::domain::task::{Task, TaskId};
use crate::error::{Result, TableroError};

/// Unique identifier for a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardId(Uuid);

impl BoardId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BoardId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for BoardId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(Uuid);

impl ColumnId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ColumnId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An ordered lane of tasks within a board.
///
/// `order` is the column's 1-based rank among the board's columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    pub order: u32,
    pub tasks: Vec<Task>,
}

impl Column {
    /// Creates a new empty column at the given rank
    pub fn new(title: impl Into<String>, order: u32) -> Self {
        Self {
            id: ColumnId::new(),
            title: title.into(),
            order,
            tasks: Vec::new(),
        }
    }

    /// Index of a task within this column's sequence
    pub fn task_index(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }
}

/// Top-level container of columns for one project board.
///
/// Columns and their tasks are kept sorted by `order` once
/// [`Board::sort_by_order`] has run; mutation goes through the reorder
/// operations, which renumber every affected container to a contiguous
/// 1-based sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub columns: Vec<Column>,
}

impl Board {
    /// Creates a new empty board
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BoardId::new(),
            name: name.into(),
            description: None,
            created_at: Utc::now(),
            columns: Vec::new(),
        }
    }

    /// Sorts columns and each column's tasks by their `order` fields.
    ///
    /// The store returns entities in arbitrary order; callers sort before
    /// display or hit-testing.
    pub fn sort_by_order(&mut self) {
        self.columns.sort_by_key(|c| c.order);
        for column in &mut self.columns {
            column.tasks.sort_by_key(|t| t.order);
        }
    }

    /// Index of a column among the board's columns
    pub fn column_index(&self, id: ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Locates a task as `(column index, task index)`
    pub fn locate_task(&self, id: TaskId) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(ci, column)| {
            column.task_index(id).map(|ti| (ci, ti))
        })
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.locate_task(id)
            .map(|(ci, ti)| &self.columns[ci].tasks[ti])
    }

    /// Verifies the ordering invariants.
    ///
    /// Column orders must be exactly `1..=N`, each column's task orders
    /// exactly `1..=M`, and every task's column reference must match the
    /// column that actually holds it. These hold after every committed
    /// reorder; a store with unsettled patches in flight may transiently
    /// violate them.
    pub fn check_integrity(&self) -> Result<()> {
        let orders: HashSet<u32> = self.columns.iter().map(|c| c.order).collect();
        let expected: HashSet<u32> = (1..=self.columns.len() as u32).collect();
        if orders != expected {
            return Err(TableroError::Integrity(format!(
                "column orders on board {} are not contiguous 1..{}",
                self.id,
                self.columns.len()
            )));
        }

        for column in &self.columns {
            let orders: HashSet<u32> = column.tasks.iter().map(|t| t.order).collect();
            let expected: HashSet<u32> = (1..=column.tasks.len() as u32).collect();
            if orders != expected {
                return Err(TableroError::Integrity(format!(
                    "task orders in column {} are not contiguous 1..{}",
                    column.id,
                    column.tasks.len()
                )));
            }

            if let Some(task) = column.tasks.iter().find(|t| t.column != column.id) {
                return Err(TableroError::Integrity(format!(
                    "task {} is held by column {} but references column {}",
                    task.id, column.id, task.column
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_tasks() -> Board {
        let mut board = Board::new("Release planning");
        let mut todo = Column::new("Todo", 1);
        let mut doing = Column::new("Doing", 2);

        todo.tasks.push(Task::new(todo.id, "Spec review", 1));
        todo.tasks.push(Task::new(todo.id, "Write tests", 2));
        doing.tasks.push(Task::new(doing.id, "Fix login bug", 1));

        board.columns.push(todo);
        board.columns.push(doing);
        board
    }

    #[test]
    fn test_integrity_holds_for_contiguous_orders() {
        let board = board_with_tasks();
        assert!(board.check_integrity().is_ok());
    }

    #[test]
    fn test_integrity_rejects_duplicate_column_order() {
        let mut board = board_with_tasks();
        board.columns[1].order = 1;
        assert!(board.check_integrity().is_err());
    }

    #[test]
    fn test_integrity_rejects_gapped_task_orders() {
        let mut board = board_with_tasks();
        board.columns[0].tasks[1].order = 5;
        assert!(board.check_integrity().is_err());
    }

    #[test]
    fn test_integrity_rejects_mismatched_column_reference() {
        let mut board = board_with_tasks();
        let other = board.columns[1].id;
        board.columns[0].tasks[0].column = other;
        assert!(board.check_integrity().is_err());
    }

    #[test]
    fn test_sort_by_order_restores_sequence() {
        let mut board = board_with_tasks();
        board.columns.swap(0, 1);
        board.columns[1].tasks.swap(0, 1);

        board.sort_by_order();

        assert_eq!(board.columns[0].title, "Todo");
        assert_eq!(board.columns[1].title, "Doing");
        assert_eq!(board.columns[0].tasks[0].title, "Spec review");
        assert_eq!(board.columns[0].tasks[1].title, "Write tests");
    }

    #[test]
    fn test_locate_task() {
        let board = board_with_tasks();
        let id = board.columns[1].tasks[0].id;

        assert_eq!(board.locate_task(id), Some((1, 0)));
        assert_eq!(board.task(id).map(|t| t.title.as_str()), Some("Fix login bug"));
        assert_eq!(board.locate_task(TaskId::new()), None);
    }
}
