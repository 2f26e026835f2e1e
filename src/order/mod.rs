//! Order reconciliation for user-sortable lists
/// Error types
mod error;
/// Move and renumber operations
mod reconciler;

pub use error::OrderError;
pub use reconciler::{
    MoveOutcome,
    OrderedCollection,
    apply_move,
};
