//! Ties the board model, the drag session and the sync dispatcher into
//! one host-facing surface.

use crate::domain::board::Board;
use crate::domain::reorder::DragSubject;
use crate::drag::{DragConfig, DragOutcome, DragSession, HoverState, LayoutSnapshot, Point};
use crate::sync::SyncDispatcher;

/// How a finished gesture should be surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEnd {
    /// The press stayed below the activation distance; open the entity's
    /// detail view.
    Clicked(DragSubject),
    /// The board was reordered; redraw, persistence is already queued.
    Committed,
    /// Nothing changed
    Cancelled,
}

/// Single-threaded engine front: owns the board exclusively, feeds
/// pointer events through the drag session, installs committed reorders
/// optimistically and hands their deltas to the dispatcher.
///
/// All mutation happens synchronously inside these calls; the only
/// asynchronous piece is persistence, which never blocks the next
/// gesture.
pub struct BoardEngine {
    board: Board,
    session: DragSession,
    dispatcher: SyncDispatcher,
}

impl BoardEngine {
    /// Takes ownership of a freshly fetched board. Entities may arrive in
    /// arbitrary store order; the engine sorts them here.
    pub fn new(mut board: Board, config: DragConfig, dispatcher: SyncDispatcher) -> Self {
        board.sort_by_order();
        Self {
            board,
            session: DragSession::new(config),
            dispatcher,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current hover hints for highlight rendering
    pub fn hover(&self) -> HoverState {
        self.session.hover()
    }

    /// Pointer pressed on a draggable task or column header
    pub fn pointer_down(&mut self, subject: DragSubject, at: Point) {
        self.session.pointer_down(subject, at);
    }

    /// Pointer moved; returns the hover hints to render
    pub fn pointer_move(&mut self, at: Point, layout: &LayoutSnapshot) -> HoverState {
        self.session.pointer_move(at, layout)
    }

    /// Pointer released: commit, cancel or click
    pub fn pointer_up(&mut self, at: Point, layout: &LayoutSnapshot) -> GestureEnd {
        match self.session.pointer_up(at, layout, &self.board) {
            DragOutcome::Clicked(subject) => GestureEnd::Clicked(subject),
            DragOutcome::Cancelled => GestureEnd::Cancelled,
            DragOutcome::Committed { board, deltas } => {
                debug_assert!(board.check_integrity().is_ok());
                self.board = board;
                self.dispatcher.dispatch(deltas);
                GestureEnd::Committed
            }
        }
    }

    /// Installs a refreshed snapshot from the dispatcher's event channel
    pub fn apply_snapshot(&mut self, mut board: Board) {
        board.sort_by_order();
        self.board = board;
    }
}
