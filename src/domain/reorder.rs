use serde::{Deserialize, Serialize};

use crate::domain::board::{Board, ColumnId};
use crate::domain::task::TaskId;

/// The entity a drag gesture is carrying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragSubject {
    Column(ColumnId),
    Task(TaskId),
}

/// The container and position a dragged entity is poised to land on.
///
/// Produced by hit-testing a layout snapshot; consumed by [`reorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// A column dragged to this index among the board's columns
    Column { index: usize },
    /// A task dragged over another task: that task's column and index
    Task { column: ColumnId, index: usize },
    /// A task dragged over a column body: append to that column
    Append { column: ColumnId },
}

/// A single entity's order/parent change to be persisted.
///
/// `column` is set only when a task changed columns; a same-container
/// move patches `order` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDelta {
    Column {
        id: ColumnId,
        order: u32,
    },
    Task {
        id: TaskId,
        column: Option<ColumnId>,
        order: u32,
    },
}

impl OrderDelta {
    /// Applies this patch to a board the way the store does: set the
    /// entity's order field, and on a column change re-parent the task.
    /// Last write wins; no renumbering of siblings happens here.
    ///
    /// Returns `false` if the entity is not on this board.
    pub fn apply_to(&self, board: &mut Board) -> bool {
        match self {
            OrderDelta::Column { id, order } => {
                match board.columns.iter_mut().find(|c| c.id == *id) {
                    Some(column) => {
                        column.order = *order;
                        true
                    }
                    None => false,
                }
            }
            OrderDelta::Task { id, column, order } => {
                let Some((ci, ti)) = board.locate_task(*id) else {
                    return false;
                };

                match column {
                    Some(dest) if *dest != board.columns[ci].id => {
                        let Some(di) = board.column_index(*dest) else {
                            return false;
                        };
                        let mut task = board.columns[ci].tasks.remove(ti);
                        task.column = *dest;
                        task.order = *order;
                        board.columns[di].tasks.push(task);
                    }
                    _ => board.columns[ci].tasks[ti].order = *order,
                }
                true
            }
        }
    }
}

/// Computes the board that results from dropping `subject` on `target`,
/// plus one delta per entity whose order or parent changed.
///
/// Pure: the input board is untouched. A target equal to the subject's
/// current position returns a clone and no deltas. Every affected
/// container is renumbered to a contiguous 1-based sequence.
///
/// # Panics
///
/// Panics if the subject or target column is not on the board, or if the
/// subject kind cannot land on the target kind. Both are precondition
/// violations in the caller, not runtime conditions.
pub fn reorder(
    board: &Board,
    subject: DragSubject,
    target: &ResolvedTarget,
) -> (Board, Vec<OrderDelta>) {
    match (subject, target) {
        (DragSubject::Column(id), ResolvedTarget::Column { index }) => {
            reorder_column(board, id, *index)
        }
        (DragSubject::Task(id), ResolvedTarget::Task { column, index }) => {
            reorder_task(board, id, *column, Some(*index))
        }
        (DragSubject::Task(id), ResolvedTarget::Append { column }) => {
            reorder_task(board, id, *column, None)
        }
        (subject, target) => {
            panic!("drag subject {subject:?} cannot land on target {target:?}")
        }
    }
}

fn reorder_column(board: &Board, id: ColumnId, new_index: usize) -> (Board, Vec<OrderDelta>) {
    let old_index = board
        .column_index(id)
        .unwrap_or_else(|| panic!("dragged column {id} is not on the board"));

    if old_index == new_index {
        return (board.clone(), Vec::new());
    }

    let mut next = board.clone();
    let column = next.columns.remove(old_index);
    let new_index = new_index.min(next.columns.len());
    next.columns.insert(new_index, column);

    let mut deltas = Vec::new();
    for (i, column) in next.columns.iter_mut().enumerate() {
        let order = (i + 1) as u32;
        if column.order != order {
            column.order = order;
            deltas.push(OrderDelta::Column {
                id: column.id,
                order,
            });
        }
    }

    (next, deltas)
}

fn reorder_task(
    board: &Board,
    id: TaskId,
    target_column: ColumnId,
    target_index: Option<usize>,
) -> (Board, Vec<OrderDelta>) {
    let (src_ci, src_ti) = board
        .locate_task(id)
        .unwrap_or_else(|| panic!("dragged task {id} is not on the board"));
    let dst_ci = board
        .column_index(target_column)
        .unwrap_or_else(|| panic!("target column {target_column} is not on the board"));

    if src_ci == dst_ci {
        return reposition_within_column(board, src_ci, src_ti, target_index);
    }

    // Cross-column move: the task leaves its source sequence and lands at
    // the end of the destination, re-parented.
    let mut next = board.clone();
    let mut task = next.columns[src_ci].tasks.remove(src_ti);

    let mut shifted = Vec::new();
    for (i, sibling) in next.columns[src_ci].tasks.iter_mut().enumerate() {
        let order = (i + 1) as u32;
        if sibling.order != order {
            sibling.order = order;
            shifted.push(OrderDelta::Task {
                id: sibling.id,
                column: None,
                order,
            });
        }
    }

    let destination = &mut next.columns[dst_ci];
    task.column = destination.id;
    task.order = destination.tasks.len() as u32 + 1;

    let mut deltas = vec![OrderDelta::Task {
        id: task.id,
        column: Some(destination.id),
        order: task.order,
    }];
    deltas.extend(shifted);
    destination.tasks.push(task);

    (next, deltas)
}

fn reposition_within_column(
    board: &Board,
    ci: usize,
    old_index: usize,
    target_index: Option<usize>,
) -> (Board, Vec<OrderDelta>) {
    let len = board.columns[ci].tasks.len();
    // Append within the same column means "move to the end".
    let new_index = target_index.unwrap_or(len.saturating_sub(1)).min(len - 1);

    if old_index == new_index {
        return (board.clone(), Vec::new());
    }

    let mut next = board.clone();
    let column = &mut next.columns[ci];
    let task = column.tasks.remove(old_index);
    column.tasks.insert(new_index.min(column.tasks.len()), task);

    let mut deltas = Vec::new();
    for (i, task) in column.tasks.iter_mut().enumerate() {
        let order = (i + 1) as u32;
        if task.order != order {
            task.order = order;
            deltas.push(OrderDelta::Task {
                id: task.id,
                column: None,
                order,
            });
        }
    }

    (next, deltas)
}
