//! Screen-side glue between user gestures, the reconcilers and the persistence collaborators
/// Multi-locale entity forms
mod editor;
/// Collaborator interfaces
mod ports;
/// Reorderable list screens
mod reorder;

pub use editor::{
    EditorError,
    EntityEditor,
    FieldViolation,
    Submission,
    SubmitError,
};
pub use ports::{
    CollectionSource,
    EntitySubmitter,
    LocaleCatalog,
    PositionStore,
    StaticLocaleCatalog,
    StoreError,
    TranslationSource,
};
pub use reorder::{
    PersistFailure,
    PersistReport,
    PositionChange,
    ReorderSession,
    WriteBatch,
};
