//! Drag-and-drop reorder screens: optimistic reorder plus per-item position writes.

use std::fmt::Debug;
use std::num::NonZeroUsize;

use futures::StreamExt;
use futures::future::join_all;
use futures::stream;
use serde::{
    Deserialize,
    Serialize,
};

use super::ports::{
    CollectionSource,
    PositionStore,
    StoreError,
};
use crate::config::ReorderSettings;
use crate::order::{
    OrderError,
    OrderedCollection,
};
use crate::types::Positioned;

/// A single `{id, position}` write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionChange<I> {
    pub id: I,
    pub position: u32,
}

/// A write the store did not accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistFailure<I> {
    pub change: PositionChange<I>,
    pub error: StoreError,
}

/// Outcome of persisting one batch. Failures are listed per item; nothing is rolled back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistReport<I> {
    pub batch: u64,
    pub written: Vec<PositionChange<I>>,
    pub failures: Vec<PersistFailure<I>>,
}

impl<I> PersistReport<I> {
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Position writes computed by one reorder.
///
/// Owned and detached from the session, so further reorders can run while a batch is
/// in flight. Each batch carries the positions that were correct when it was computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteBatch<I> {
    /// Session-local sequence number, starting at 1
    batch: u64,
    /// Writes in the order they should be issued
    changes: Vec<PositionChange<I>>,
    /// `None` issues every write at once
    max_concurrent_writes: Option<NonZeroUsize>,
}

impl<I> WriteBatch<I>
where
    I: Clone + Debug + Send + Sync,
{
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.batch
    }

    #[must_use]
    pub fn changes(&self) -> &[PositionChange<I>] {
        &self.changes
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Issues one `persist_position` per change, concurrently.
    ///
    /// Writes touch disjoint items so their completion order does not matter. The store
    /// is called exactly once per change; retries are the store's business.
    pub async fn persist(self, store: &dyn PositionStore<I>) -> PersistReport<I> {
        let batch = self.batch;
        tracing::debug!(batch, writes = self.changes.len(), "Persisting position batch");

        let writes = self.changes.into_iter().map(|change| async move {
            let result = store.persist_position(&change.id, change.position).await;
            (change, result)
        });

        let results: Vec<_> = match self.max_concurrent_writes {
            Some(limit) => stream::iter(writes).buffered(limit.get()).collect().await,
            None => join_all(writes).await,
        };

        let mut written = Vec::new();
        let mut failures = Vec::new();
        for (change, result) in results {
            match result {
                Ok(()) => written.push(change),
                Err(error) => {
                    tracing::warn!(
                        batch,
                        id = ?change.id,
                        position = change.position,
                        %error,
                        "Position write failed"
                    );
                    failures.push(PersistFailure { change, error });
                }
            }
        }

        PersistReport { batch, written, failures }
    }
}

/// State behind a reorderable list screen.
#[derive(Debug, Clone)]
pub struct ReorderSession<T> {
    /// Optimistic view of the list
    collection: OrderedCollection<T>,
    /// Number given to the next batch
    next_batch: u64,
    settings: ReorderSettings,
}

impl<T> ReorderSession<T>
where
    T: Positioned + Clone + Send,
{
    #[must_use]
    pub fn new(items: Vec<T>, settings: ReorderSettings) -> Self {
        Self { collection: OrderedCollection::hydrate(items), next_batch: 1, settings }
    }

    /// Loads the list once, on screen mount.
    ///
    /// # Errors
    /// The fetch collaborator failed.
    pub async fn hydrate(
        source: &dyn CollectionSource<T>,
        settings: ReorderSettings,
    ) -> Result<Self, StoreError> {
        let items = source.load_collection().await?;
        tracing::debug!(items = items.len(), "Hydrated reorder session");
        Ok(Self::new(items, settings))
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        self.collection.items()
    }

    #[must_use]
    pub const fn collection(&self) -> &OrderedCollection<T> {
        &self.collection
    }

    /// Applies a drag from `from` to `to` and returns the writes to issue.
    ///
    /// The held list is replaced before any write happens. A move onto the same index
    /// yields an empty batch.
    ///
    /// # Errors
    /// `from` or `to` is out of range. The held list is left unchanged.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<WriteBatch<T::Id>, OrderError> {
        let outcome = self.collection.apply_move(from, to)?;
        self.collection.commit(&outcome);

        let batch = self.next_batch;
        self.next_batch += 1;

        let changes = outcome
            .changed
            .iter()
            .map(|item| PositionChange { id: item.id().clone(), position: item.position() })
            .collect();

        Ok(WriteBatch {
            batch,
            changes,
            max_concurrent_writes: self.settings.max_concurrent_writes,
        })
    }

    /// Reorders and waits for the batch to settle.
    ///
    /// # Errors
    /// `from` or `to` is out of range. Write failures are in the report, not here.
    pub async fn reorder_and_persist(
        &mut self,
        from: usize,
        to: usize,
        store: &dyn PositionStore<T::Id>,
    ) -> Result<PersistReport<T::Id>, OrderError> {
        let batch = self.reorder(from, to)?;
        Ok(batch.persist(store).await)
    }

    /// Replaces the optimistic list with the store's canonical order.
    ///
    /// # Errors
    /// The fetch collaborator failed. The held list is kept.
    pub async fn reload(&mut self, source: &dyn CollectionSource<T>) -> Result<(), StoreError> {
        let items = source.load_collection().await?;
        self.collection = OrderedCollection::hydrate(items);
        tracing::debug!(items = self.collection.len(), "Reloaded canonical order");
        Ok(())
    }
}
