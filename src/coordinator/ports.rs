//! Interfaces to the data-loading and persistence collaborators.
//!
//! Screens inject implementations of these traits; the coordinator never talks to the
//! network itself.

use async_trait::async_trait;
use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use super::editor::{
    Submission,
    SubmitError,
};
use crate::draft::DraftRecord;
use crate::types::LocaleCode;

/// Failure reported by a fetch or write collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreError {
    /// The backing store refused the request
    #[error("Request rejected: {0}")]
    Rejected(String),
    /// The backing store could not be reached or timed out
    #[error("Store unavailable: {0}")]
    Unavailable(String),
    /// The addressed entity does not exist
    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Fetches the list a reorder screen shows.
#[async_trait]
pub trait CollectionSource<T>: Send + Sync {
    /// Returns rows already carrying their stored positions.
    async fn load_collection(&self) -> Result<Vec<T>, StoreError>;
}

/// Writes one item's new position.
#[async_trait]
pub trait PositionStore<I>: Send + Sync
where
    I: Send + Sync,
{
    async fn persist_position(&self, id: &I, position: u32) -> Result<(), StoreError>;
}

/// Fetches an existing entity's per-locale values.
#[async_trait]
pub trait TranslationSource: Send + Sync {
    async fn load_translations(
        &self,
        entity_id: &str,
    ) -> Result<Vec<(LocaleCode, DraftRecord)>, StoreError>;
}

/// Creates or updates an entity from a combined submission.
#[async_trait]
pub trait EntitySubmitter: Send + Sync {
    type Entity: Send;

    async fn submit_entity(&self, submission: &Submission) -> Result<Self::Entity, SubmitError>;
}

/// Read-only reference data: which locales a form may offer.
pub trait LocaleCatalog: Send + Sync {
    fn is_offered(&self, locale: &LocaleCode) -> bool;

    /// Offered locales in display order. Empty when any locale is accepted.
    fn offered(&self) -> Vec<LocaleCode>;
}

/// Catalog backed by a fixed list, or accepting everything when built with `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticLocaleCatalog {
    /// `None` accepts every locale
    locales: Option<Vec<LocaleCode>>,
}

impl StaticLocaleCatalog {
    #[must_use]
    pub const fn new(locales: Option<Vec<LocaleCode>>) -> Self {
        Self { locales }
    }

    #[must_use]
    pub const fn any() -> Self {
        Self { locales: None }
    }

    /// Catalog for the `offeredLocales` setting.
    #[must_use]
    pub fn from_settings(settings: &crate::config::EngineSettings) -> Self {
        Self {
            locales: settings
                .offered_locales
                .as_ref()
                .map(|codes| codes.iter().map(|code| LocaleCode::new(code.as_str())).collect()),
        }
    }
}

impl LocaleCatalog for StaticLocaleCatalog {
    fn is_offered(&self, locale: &LocaleCode) -> bool {
        self.locales.as_ref().is_none_or(|locales| locales.contains(locale))
    }

    fn offered(&self) -> Vec<LocaleCode> {
        self.locales.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::config::EngineSettings;

    #[rstest]
    fn any_catalog_accepts_every_locale() {
        let catalog = StaticLocaleCatalog::any();

        assert_that!(catalog.is_offered(&LocaleCode::from("tlh")), eq(true));
        assert_that!(catalog.offered(), len(eq(0)));
    }

    #[rstest]
    fn fixed_catalog_rejects_unlisted_locale() {
        let catalog = StaticLocaleCatalog::new(Some(vec!["en".into(), "fr".into()]));

        assert_that!(catalog.is_offered(&LocaleCode::from("fr")), eq(true));
        assert_that!(catalog.is_offered(&LocaleCode::from("de")), eq(false));
    }

    #[rstest]
    fn catalog_from_settings_uses_offered_locales() {
        let settings = EngineSettings {
            offered_locales: Some(vec!["en".to_string(), "ar".to_string()]),
            ..EngineSettings::default()
        };

        let catalog = StaticLocaleCatalog::from_settings(&settings);

        assert_eq!(catalog.offered(), vec![LocaleCode::from("en"), LocaleCode::from("ar")]);
    }
}
