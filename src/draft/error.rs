use thiserror::Error;

use crate::types::LocaleCode;

/// Misuse of the draft cache by the form wiring.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// The form tried to activate a locale it never offered
    #[error("Locale '{0}' is not offered by this form")]
    UnknownLocale(LocaleCode),
    /// The form tried to edit a field that is not localized
    #[error("Field '{field}' is not a localized field")]
    UnknownField { field: String },
}
