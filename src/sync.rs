//! Asynchronous persistence of committed reorders.
//!
//! The engine commits optimistically and hands its deltas to a
//! [`SyncDispatcher`]; nothing on the interaction path ever waits for the
//! store. Failures and follow-up snapshots come back on an event channel
//! the host observes at its own pace.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::{Board, BoardId, OrderDelta};
use crate::error::TableroError;
use crate::storage::BoardStore;

/// One batch of deltas from one committed reorder
#[derive(Debug)]
struct PersistBatch {
    deltas: Vec<OrderDelta>,
}

/// What the dispatcher reports back on its event channel
#[derive(Debug)]
pub enum SyncEvent {
    /// A persistence call failed. The committed board is not rolled
    /// back; local and remote state diverge until the next snapshot.
    PersistFailed {
        delta: OrderDelta,
        error: TableroError,
    },
    /// Fresh snapshot fetched after a cross-column move settled, already
    /// sorted by order. Install it to reconcile any server-side
    /// recomputation.
    SnapshotRefreshed(Board),
    /// The follow-up snapshot fetch itself failed
    RefreshFailed { error: TableroError },
}

/// Fire-and-forget bridge between committed reorders and the store.
///
/// `dispatch` appends a batch to the outbound queue and returns
/// immediately. A worker drains the queue and issues one independent
/// store call per delta; calls are not serialized against each other,
/// so the store sees last-write-wins. Dropping the dispatcher closes the
/// queue and ends the worker; calls already in flight run to completion.
pub struct SyncDispatcher {
    queue: mpsc::UnboundedSender<PersistBatch>,
}

impl SyncDispatcher {
    /// Starts the worker for one board and returns the dispatcher handle
    /// plus the event channel to observe.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        store: Arc<dyn BoardStore>,
        board: BoardId,
    ) -> (Self, mpsc::UnboundedReceiver<SyncEvent>) {
        let (queue, mut batches) = mpsc::unbounded_channel::<PersistBatch>();
        let (events, event_rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            while let Some(batch) = batches.recv().await {
                for delta in batch.deltas {
                    let store = Arc::clone(&store);
                    let events = events.clone();
                    tokio::spawn(async move {
                        persist_one(store, board, delta, events).await;
                    });
                }
            }
        });

        (Self { queue }, event_rx)
    }

    /// Enqueues the deltas of one committed reorder and returns
    /// immediately. An empty batch is dropped.
    pub fn dispatch(&self, deltas: Vec<OrderDelta>) {
        if deltas.is_empty() {
            return;
        }
        // Send only fails when the worker is gone, i.e. during teardown.
        let _ = self.queue.send(PersistBatch { deltas });
    }
}

async fn persist_one(
    store: Arc<dyn BoardStore>,
    board: BoardId,
    delta: OrderDelta,
    events: mpsc::UnboundedSender<SyncEvent>,
) {
    // A delta that re-parents a task gets a follow-up snapshot once the
    // call settles, to pick up any server-side renumbering.
    let reparented = matches!(&delta, OrderDelta::Task { column: Some(_), .. });

    if let Err(error) = store.update_order(&delta).await {
        tracing::warn!(%error, ?delta, "order update failed; keeping optimistic board");
        let _ = events.send(SyncEvent::PersistFailed { delta, error });
        return;
    }

    if reparented {
        match store.fetch_board(board).await {
            Ok(mut fresh) => {
                fresh.sort_by_order();
                let _ = events.send(SyncEvent::SnapshotRefreshed(fresh));
            }
            Err(error) => {
                tracing::warn!(%error, "snapshot refresh after cross-column move failed");
                let _ = events.send(SyncEvent::RefreshFailed { error });
            }
        }
    }
}
