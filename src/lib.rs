//! # Tablero Core
//!
//! Board reordering engine for Tablero project boards.
//!
//! This crate implements the state machine behind drag-and-drop on a
//! kanban-style board: tracking a drag gesture, resolving what the
//! pointer is over, computing new orderings for columns and tasks, and
//! persisting the changes asynchronously while the UI stays optimistic.
//! Rendering, CRUD dialogs and authentication live in the host
//! application; the engine only needs a [`storage::BoardStore`] to talk
//! to.

pub mod domain;
pub mod drag;
pub mod engine;
pub mod error;
pub mod storage;
pub mod sync;

// Re-export commonly used types
pub use domain::{
    board::{Board, BoardId, Column, ColumnId},
    reorder::{reorder, DragSubject, OrderDelta, ResolvedTarget},
    task::{Task, TaskId},
};
pub use drag::{
    DragConfig, DragOutcome, DragSession, HoverState, LayoutSnapshot, Point, Rect,
};
pub use engine::{BoardEngine, GestureEnd};
pub use error::{Result, TableroError};
pub use storage::BoardStore;
pub use sync::{SyncDispatcher, SyncEvent};
