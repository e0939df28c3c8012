use std::cmp::Ordering;

use crate::domain::board::ColumnId;
use crate::domain::reorder::{DragSubject, ResolvedTarget};
use crate::domain::task::TaskId;
use crate::drag::geometry::{Point, Rect};

/// Bounding box of one rendered column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnRegion {
    pub id: ColumnId,
    pub bounds: Rect,
}

/// Bounding box of one rendered task card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaskRegion {
    pub id: TaskId,
    pub column: ColumnId,
    pub bounds: Rect,
}

/// The geometry the host reports each frame: one rect per rendered column
/// and task, pushed in display order.
///
/// Display order matters: a resolved column target's index is its position
/// in this snapshot, and a resolved task target's index is its position
/// among the snapshot's tasks for the same column.
#[derive(Debug, Clone, Default)]
pub struct LayoutSnapshot {
    columns: Vec<ColumnRegion>,
    tasks: Vec<TaskRegion>,
}

impl LayoutSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_column(&mut self, id: ColumnId, bounds: Rect) {
        self.columns.push(ColumnRegion { id, bounds });
    }

    pub fn push_task(&mut self, id: TaskId, column: ColumnId, bounds: Rect) {
        self.tasks.push(TaskRegion { id, column, bounds });
    }

    pub fn column_id_at(&self, index: usize) -> Option<ColumnId> {
        self.columns.get(index).map(|c| c.id)
    }

    /// The task at `index` within `column`'s sequence, if rendered
    pub fn task_id_at(&self, column: ColumnId, index: usize) -> Option<TaskId> {
        self.tasks
            .iter()
            .filter(|t| t.column == column)
            .nth(index)
            .map(|t| t.id)
    }

    /// Resolves what `subject` would land on at `pointer`.
    ///
    /// A dragged column considers only column bodies; a dragged task
    /// prefers task cards and falls back to a column body (append). Among
    /// candidates containing the pointer, the smallest nearest-corner
    /// distance wins; ties keep the earliest in display order, so an
    /// unchanged pointer always resolves to the same target. No containing
    /// candidate means no target, which cancels the drag rather than
    /// erroring.
    pub fn resolve(&self, subject: DragSubject, pointer: Point) -> Option<ResolvedTarget> {
        match subject {
            DragSubject::Column(_) => self
                .closest(self.columns.iter().map(|c| c.bounds).enumerate(), pointer)
                .map(|(index, _)| ResolvedTarget::Column { index }),
            DragSubject::Task(_) => {
                if let Some((i, _)) = self.closest(
                    self.tasks.iter().map(|t| t.bounds).enumerate(),
                    pointer,
                ) {
                    let hit = &self.tasks[i];
                    let index = self
                        .tasks
                        .iter()
                        .take(i)
                        .filter(|t| t.column == hit.column)
                        .count();
                    return Some(ResolvedTarget::Task {
                        column: hit.column,
                        index,
                    });
                }

                self.closest(
                    self.columns.iter().map(|c| c.bounds).enumerate(),
                    pointer,
                )
                .map(|(i, _)| ResolvedTarget::Append {
                    column: self.columns[i].id,
                })
            }
        }
    }

    fn closest(
        &self,
        candidates: impl Iterator<Item = (usize, Rect)>,
        pointer: Point,
    ) -> Option<(usize, Rect)> {
        candidates
            .filter(|(_, bounds)| bounds.contains(pointer))
            .min_by(|(_, a), (_, b)| {
                a.nearest_corner_distance(pointer)
                    .partial_cmp(&b.nearest_corner_distance(pointer))
                    .unwrap_or(Ordering::Equal)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Three 200-wide columns side by side, two task cards in the first.
    fn snapshot() -> (LayoutSnapshot, Vec<ColumnId>, Vec<TaskId>) {
        let columns: Vec<ColumnId> = (0..3).map(|_| ColumnId::new()).collect();
        let tasks: Vec<TaskId> = (0..2).map(|_| TaskId::new()).collect();

        let mut layout = LayoutSnapshot::new();
        for (i, id) in columns.iter().enumerate() {
            layout.push_column(*id, Rect::new(i as f32 * 210.0, 0.0, 200.0, 600.0));
        }
        layout.push_task(tasks[0], columns[0], Rect::new(10.0, 40.0, 180.0, 60.0));
        layout.push_task(tasks[1], columns[0], Rect::new(10.0, 110.0, 180.0, 60.0));

        (layout, columns, tasks)
    }

    #[test]
    fn test_column_drag_resolves_to_column_index() {
        let (layout, columns, _) = snapshot();
        let subject = DragSubject::Column(columns[0]);

        let target = layout.resolve(subject, Point::new(500.0, 300.0));
        assert_eq!(target, Some(ResolvedTarget::Column { index: 2 }));
    }

    #[test]
    fn test_column_drag_ignores_task_cards() {
        let (layout, columns, _) = snapshot();
        let subject = DragSubject::Column(columns[1]);

        // Directly over the first task card, but a column drag only sees lanes
        let target = layout.resolve(subject, Point::new(100.0, 70.0));
        assert_eq!(target, Some(ResolvedTarget::Column { index: 0 }));
    }

    #[test]
    fn test_task_drag_over_task_resolves_to_its_slot() {
        let (layout, columns, tasks) = snapshot();
        let subject = DragSubject::Task(tasks[0]);

        let target = layout.resolve(subject, Point::new(100.0, 130.0));
        assert_eq!(
            target,
            Some(ResolvedTarget::Task {
                column: columns[0],
                index: 1
            })
        );
    }

    #[test]
    fn test_task_drag_over_column_body_appends() {
        let (layout, columns, tasks) = snapshot();
        let subject = DragSubject::Task(tasks[0]);

        let target = layout.resolve(subject, Point::new(320.0, 300.0));
        assert_eq!(
            target,
            Some(ResolvedTarget::Append {
                column: columns[1]
            })
        );
    }

    #[test]
    fn test_no_containing_region_resolves_to_none() {
        let (layout, _, tasks) = snapshot();
        let subject = DragSubject::Task(tasks[0]);

        assert_eq!(layout.resolve(subject, Point::new(2000.0, 50.0)), None);
    }

    #[test]
    fn test_resolution_is_deterministic_for_a_fixed_pointer() {
        let (layout, _, tasks) = snapshot();
        let subject = DragSubject::Task(tasks[1]);
        let pointer = Point::new(100.0, 70.0);

        let first = layout.resolve(subject, pointer);
        for _ in 0..10 {
            assert_eq!(layout.resolve(subject, pointer), first);
        }
    }

    #[test]
    fn test_overlapping_cards_pick_nearest_corner() {
        let columns = [ColumnId::new()];
        let tasks = [TaskId::new(), TaskId::new()];

        let mut layout = LayoutSnapshot::new();
        layout.push_column(columns[0], Rect::new(0.0, 0.0, 200.0, 600.0));
        // Mid-drag the cards overlap between y=80 and y=100
        layout.push_task(tasks[0], columns[0], Rect::new(10.0, 20.0, 180.0, 80.0));
        layout.push_task(tasks[1], columns[0], Rect::new(10.0, 80.0, 180.0, 80.0));

        // In the overlap band near y=83 the second card's top corners win
        let target = layout.resolve(DragSubject::Task(tasks[0]), Point::new(20.0, 83.0));
        assert_eq!(
            target,
            Some(ResolvedTarget::Task {
                column: columns[0],
                index: 1
            })
        );

        // Near y=97 the first card's bottom corners are closer
        let target = layout.resolve(DragSubject::Task(tasks[1]), Point::new(20.0, 97.0));
        assert_eq!(
            target,
            Some(ResolvedTarget::Task {
                column: columns[0],
                index: 0
            })
        );
    }

    #[test]
    fn test_exact_tie_keeps_display_order() {
        let columns = [ColumnId::new()];
        let tasks = [TaskId::new(), TaskId::new()];

        let mut layout = LayoutSnapshot::new();
        layout.push_column(columns[0], Rect::new(0.0, 0.0, 200.0, 600.0));
        // Two cards sharing an edge: a pointer on the seam is equidistant
        layout.push_task(tasks[0], columns[0], Rect::new(10.0, 0.0, 180.0, 100.0));
        layout.push_task(tasks[1], columns[0], Rect::new(10.0, 100.0, 180.0, 100.0));

        let target = layout.resolve(DragSubject::Column(ColumnId::new()), Point::new(100.0, 100.0));
        // Column drag over the lane still resolves to the lane itself
        assert_eq!(target, Some(ResolvedTarget::Column { index: 0 }));

        let target = layout.resolve(DragSubject::Task(tasks[0]), Point::new(100.0, 100.0));
        assert_eq!(
            target,
            Some(ResolvedTarget::Task {
                column: columns[0],
                index: 0
            })
        );
    }

    #[test]
    fn test_task_index_counts_within_owning_column() {
        let columns = [ColumnId::new(), ColumnId::new()];
        let tasks = [TaskId::new(), TaskId::new(), TaskId::new()];

        let mut layout = LayoutSnapshot::new();
        layout.push_column(columns[0], Rect::new(0.0, 0.0, 200.0, 600.0));
        layout.push_column(columns[1], Rect::new(210.0, 0.0, 200.0, 600.0));
        layout.push_task(tasks[0], columns[0], Rect::new(10.0, 40.0, 180.0, 60.0));
        layout.push_task(tasks[1], columns[1], Rect::new(220.0, 40.0, 180.0, 60.0));
        layout.push_task(tasks[2], columns[1], Rect::new(220.0, 110.0, 180.0, 60.0));

        // Second card of the second column is index 1 there, not index 2 overall
        let target = layout.resolve(DragSubject::Task(tasks[0]), Point::new(300.0, 130.0));
        assert_eq!(
            target,
            Some(ResolvedTarget::Task {
                column: columns[1],
                index: 1
            })
        );
    }
}
