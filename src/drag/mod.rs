//! Drag gesture lifecycle: activation, hover tracking, commit/cancel.
//!
//! One [`DragSession`] tracks one pointer gesture at a time. A press
//! becomes a drag only once the pointer travels past the activation
//! distance; shorter presses surface as a click so the host can open the
//! entity's detail view instead.

use serde::{Deserialize, Serialize};

use crate::domain::board::{Board, ColumnId};
use crate::domain::reorder::{reorder, DragSubject, OrderDelta, ResolvedTarget};
use crate::domain::task::TaskId;

pub mod geometry;
pub mod resolver;

pub use geometry::{Point, Rect};
pub use resolver::{ColumnRegion, LayoutSnapshot, TaskRegion};

/// Drag gesture recognition settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragConfig {
    /// Pointer travel required before a press becomes a drag, in layout
    /// units. Presses that release earlier count as clicks.
    pub activation_distance: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            activation_distance: 8.0,
        }
    }
}

/// Transient hover hints for presentation while a drag is live.
///
/// These never touch the board model; they exist so the host can highlight
/// the container and card the drag is poised to land on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HoverState {
    pub column: Option<ColumnId>,
    pub task: Option<TaskId>,
}

/// How a gesture ended
#[derive(Debug)]
pub enum DragOutcome {
    /// The press released below the activation distance; the host should
    /// fire the entity's open-detail action.
    Clicked(DragSubject),
    /// A reorder was committed: `board` is the new model to install and
    /// `deltas` are the order changes to persist.
    Committed {
        board: Board,
        deltas: Vec<OrderDelta>,
    },
    /// No target, or a target at the subject's current position. Nothing
    /// was mutated and nothing needs persisting.
    Cancelled,
}

enum SessionState {
    Idle,
    Pending { subject: DragSubject, origin: Point },
    Dragging { subject: DragSubject, hover: HoverState },
}

/// State machine for one drag gesture at a time.
///
/// Lifecycle: `pointer_down` arms a pending press, `pointer_move` promotes
/// it to a live drag past the activation distance and keeps the hover
/// hints current, `pointer_up` ends the gesture with a [`DragOutcome`] and
/// returns to idle. Only one gesture may be live; the host's pointer
/// capture guarantees that, so a second `pointer_down` mid-gesture is a
/// caller bug and panics.
pub struct DragSession {
    config: DragConfig,
    state: SessionState,
}

impl DragSession {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, SessionState::Idle)
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, SessionState::Dragging { .. })
    }

    /// Current hover hints; empty unless a drag is live
    pub fn hover(&self) -> HoverState {
        match &self.state {
            SessionState::Dragging { hover, .. } => *hover,
            _ => HoverState::default(),
        }
    }

    /// Arms a press on a draggable entity.
    ///
    /// # Panics
    ///
    /// Panics if a gesture is already live.
    pub fn pointer_down(&mut self, subject: DragSubject, at: Point) {
        match self.state {
            SessionState::Idle => {
                self.state = SessionState::Pending {
                    subject,
                    origin: at,
                };
            }
            _ => panic!("pointer_down while a drag gesture is already live"),
        }
    }

    /// Feeds a pointer movement and returns the hover hints to render.
    ///
    /// In the pending phase this decides click vs drag; once dragging it
    /// re-resolves the target under the pointer. Movement never mutates
    /// the board.
    pub fn pointer_move(&mut self, at: Point, layout: &LayoutSnapshot) -> HoverState {
        match &self.state {
            SessionState::Idle => HoverState::default(),
            SessionState::Pending { subject, origin } => {
                if origin.distance(at) < self.config.activation_distance {
                    return HoverState::default();
                }
                let subject = *subject;
                let hover = hover_for(subject, at, layout);
                self.state = SessionState::Dragging { subject, hover };
                hover
            }
            SessionState::Dragging { subject, .. } => {
                let subject = *subject;
                let hover = hover_for(subject, at, layout);
                self.state = SessionState::Dragging { subject, hover };
                hover
            }
        }
    }

    /// Ends the gesture and returns to idle.
    ///
    /// A pending press becomes a click. A live drag commits when the
    /// resolved target differs from the subject's current position and
    /// cancels otherwise; a commit computes the new board and its deltas
    /// but installs neither, that being the caller's synchronous step.
    pub fn pointer_up(
        &mut self,
        at: Point,
        layout: &LayoutSnapshot,
        board: &Board,
    ) -> DragOutcome {
        let ended = std::mem::replace(&mut self.state, SessionState::Idle);
        match ended {
            SessionState::Idle => DragOutcome::Cancelled,
            SessionState::Pending { subject, .. } => DragOutcome::Clicked(subject),
            SessionState::Dragging { subject, .. } => {
                let Some(target) = layout.resolve(subject, at) else {
                    return DragOutcome::Cancelled;
                };

                let (next, deltas) = reorder(board, subject, &target);
                if deltas.is_empty() {
                    DragOutcome::Cancelled
                } else {
                    DragOutcome::Committed {
                        board: next,
                        deltas,
                    }
                }
            }
        }
    }
}

fn hover_for(subject: DragSubject, at: Point, layout: &LayoutSnapshot) -> HoverState {
    match layout.resolve(subject, at) {
        Some(ResolvedTarget::Column { index }) => HoverState {
            column: layout.column_id_at(index),
            task: None,
        },
        Some(ResolvedTarget::Task { column, index }) => HoverState {
            column: Some(column),
            task: layout.task_id_at(column, index),
        },
        Some(ResolvedTarget::Append { column }) => HoverState {
            column: Some(column),
            task: None,
        },
        None => HoverState::default(),
    }
}
