//! Single-element moves over a positioned list.

use super::OrderError;
use crate::types::Positioned;

/// Result of a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome<T> {
    /// The full list after the pass, numbered `1..=N`.
    pub collection: Vec<T>,
    /// Items whose position value changed, carrying the new value, in the order they
    /// appear in `collection`.
    pub changed: Vec<T>,
}

impl<T> MoveOutcome<T> {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Moves the element at `from` to `to` and renumbers the result.
///
/// Elements strictly between `from` and `to` shift by one slot. An item is reported as
/// changed only when its newly assigned position differs from the one it held before.
/// `from == to` returns the input untouched with no changes, even when its positions are
/// not contiguous.
///
/// # Examples
/// ```
/// use draft_reconciler::order::apply_move;
/// use draft_reconciler::types::OrderedItem;
///
/// let items = vec![
///     OrderedItem::new('A', 1),
///     OrderedItem::new('B', 2),
///     OrderedItem::new('C', 3),
///     OrderedItem::new('D', 4),
/// ];
///
/// let outcome = apply_move(&items, 0, 2).unwrap();
/// let changed: Vec<_> = outcome.changed.iter().map(|i| (i.id, i.position)).collect();
/// assert_eq!(changed, vec![('B', 1), ('C', 2), ('A', 3)]);
/// ```
///
/// # Errors
/// - `from` or `to` is out of range
/// - the list is too long to number with `u32` positions
pub fn apply_move<T>(items: &[T], from: usize, to: usize) -> Result<MoveOutcome<T>, OrderError>
where
    T: Positioned + Clone,
{
    let len = items.len();
    ensure_index(from, len)?;
    ensure_index(to, len)?;

    if from == to {
        tracing::debug!(from, "Move onto the same index, nothing to reconcile");
        return Ok(MoveOutcome { collection: items.to_vec(), changed: Vec::new() });
    }

    let mut collection = items.to_vec();
    let moved = collection.remove(from);
    collection.insert(to, moved);

    let changed = renumber_in_place(&mut collection)?;
    tracing::debug!(from, to, changed = changed.len(), "Applied move");

    Ok(MoveOutcome { collection, changed })
}

fn ensure_index(index: usize, len: usize) -> Result<(), OrderError> {
    if index < len {
        Ok(())
    } else {
        tracing::error!(index, len, "Move index out of range");
        Err(OrderError::IndexOutOfRange { index, len })
    }
}

/// Assigns `position = index + 1` and collects every item whose value changed.
fn renumber_in_place<T>(items: &mut [T]) -> Result<Vec<T>, OrderError>
where
    T: Positioned + Clone,
{
    let len = items.len();
    if u32::try_from(len).is_err() {
        return Err(OrderError::CollectionTooLarge { len });
    }

    let mut changed = Vec::new();
    for (position, item) in (1..=u32::MAX).zip(items.iter_mut()) {
        if item.position() != position {
            item.set_position(position);
            changed.push(item.clone());
        }
    }
    Ok(changed)
}

/// A list held by one screen, in display order.
///
/// Display order is sequence order. After any reconciliation pass `position` mirrors it
/// (`items[i].position() == i + 1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedCollection<T> {
    items: Vec<T>,
}

impl<T> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> OrderedCollection<T>
where
    T: Positioned + Clone,
{
    /// Builds a collection from fetched rows, sorted by their stored position.
    ///
    /// The sort is stable, so rows sharing a position keep their fetch order.
    /// Positions are not rewritten; see [`OrderedCollection::renumber`].
    #[must_use]
    pub fn hydrate(mut items: Vec<T>) -> Self {
        items.sort_by_key(Positioned::position);
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the item with the given id, for gestures that report ids instead of slots.
    #[must_use]
    pub fn index_of(&self, id: &T::Id) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    /// True when positions are exactly `1..=N` in sequence order.
    #[must_use]
    pub fn is_contiguous(&self) -> bool {
        (1..=u32::MAX).zip(&self.items).all(|(position, item)| item.position() == position)
    }

    /// See [`apply_move`].
    ///
    /// # Errors
    /// Same as [`apply_move`].
    pub fn apply_move(&self, from: usize, to: usize) -> Result<MoveOutcome<T>, OrderError> {
        apply_move(&self.items, from, to)
    }

    /// Renumbers without moving anything.
    ///
    /// Used to compact hydrated rows whose stored positions have gaps or duplicates.
    ///
    /// # Errors
    /// The list is too long to number with `u32` positions.
    pub fn renumber(&self) -> Result<MoveOutcome<T>, OrderError> {
        let mut collection = self.items.clone();
        let changed = renumber_in_place(&mut collection)?;
        Ok(MoveOutcome { collection, changed })
    }

    /// Replaces the held items with the result of a pass.
    pub fn commit(&mut self, outcome: &MoveOutcome<T>) {
        self.items.clone_from(&outcome.collection);
    }
}
