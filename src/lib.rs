//! draft-reconciler
//!
//! 管理画面のための並び替え差分計算と、多言語フォームの下書きキャッシュ
//!
//! - [`order`]: drag-and-drop moves with minimal position diffs
//! - [`draft`]: per-locale drafts kept across locale switches, flattened at submit time
//! - [`coordinator`]: wiring to the fetch and persistence collaborators

pub mod config;
pub mod coordinator;
pub mod draft;
pub mod order;
pub mod telemetry;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use coordinator::{
    EntityEditor,
    ReorderSession,
};
pub use draft::DraftCache;
pub use order::{
    OrderedCollection,
    apply_move,
};
