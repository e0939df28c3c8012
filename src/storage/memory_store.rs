use crate::{
    domain::{Board, BoardId, OrderDelta},
    error::{Result, TableroError},
    storage::BoardStore,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory store, the reference collaborator for tests and embedding.
///
/// Boards live in a mutex-guarded map; each patch locks, applies, and
/// releases, so concurrent patches interleave with last-write-wins
/// semantics just like a remote store without transactions.
#[derive(Default)]
pub struct MemoryStore {
    boards: Mutex<HashMap<BoardId, Board>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a board, replacing any existing one with the same id
    pub fn insert_board(&self, board: Board) {
        self.boards
            .lock()
            .expect("board map lock poisoned")
            .insert(board.id, board);
    }
}

#[async_trait]
impl BoardStore for MemoryStore {
    async fn fetch_board(&self, id: BoardId) -> Result<Board> {
        self.boards
            .lock()
            .expect("board map lock poisoned")
            .get(&id)
            .cloned()
            .ok_or(TableroError::BoardNotFound(id))
    }

    async fn update_order(&self, delta: &OrderDelta) -> Result<()> {
        let mut boards = self.boards.lock().expect("board map lock poisoned");

        for board in boards.values_mut() {
            if delta.apply_to(board) {
                return Ok(());
            }
        }

        Err(match delta {
            OrderDelta::Column { id, .. } => TableroError::ColumnNotFound(*id),
            OrderDelta::Task { id, .. } => TableroError::TaskNotFound(*id),
        })
    }
}
