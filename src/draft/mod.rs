//! Per-locale draft cache for multi-language entity forms
/// Draft cache state machine
mod cache;
/// Error types
mod error;
/// Flattened submission rows
mod payload;
/// Per-locale field map
mod record;

pub use cache::DraftCache;
pub use error::DraftError;
pub use payload::{
    LocalizedRecord,
    SubmissionPayload,
};
pub use record::DraftRecord;
