use crate::{
    domain::{Board, BoardId, OrderDelta},
    error::Result,
};
use async_trait::async_trait;

pub mod memory_store;

#[cfg(feature = "file-storage")]
pub mod file_store;

pub use memory_store::MemoryStore;

#[cfg(feature = "file-storage")]
pub use file_store::FileStore;

/// Persistence contract the reordering engine consumes.
///
/// The engine never creates or deletes entities through this trait; it
/// only reads board snapshots and patches order/parent fields. The store
/// offers no ordering guarantee across concurrent patches: last write
/// wins. Credentials a remote implementation needs are injected at
/// construction, never read from ambient state.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Returns the full board. Columns and tasks may arrive in any order;
    /// callers sort by the `order` fields before use.
    async fn fetch_board(&self, id: BoardId) -> Result<Board>;

    /// Applies one order/parent patch to the entity it names
    async fn update_order(&self, delta: &OrderDelta) -> Result<()>;
}
