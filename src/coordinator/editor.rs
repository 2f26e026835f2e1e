//! Multi-locale entity forms: locale switching, live edits and the combined submit.

use std::sync::Arc;

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

use super::ports::{
    EntitySubmitter,
    LocaleCatalog,
    StoreError,
    TranslationSource,
};
use crate::config::EngineSettings;
use crate::draft::{
    DraftCache,
    DraftError,
    SubmissionPayload,
};
use crate::types::{
    FieldValue,
    LocaleCode,
};

/// A single rejected field, as reported by the submit collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// `None` for non-localized fields
    pub locale: Option<LocaleCode>,
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    #[must_use]
    pub fn new(
        locale: Option<LocaleCode>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self { locale, field: field.into(), message: message.into() }
    }
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| match &v.locale {
            Some(locale) => format!("{locale}.{}: {}", v.field, v.message),
            None => format!("{}: {}", v.field, v.message),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Rejection of a submission.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Submission rejected: {}", format_violations(.0))]
    Validation(Vec<FieldViolation>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors surfaced by [`EntityEditor`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("Failed to load translations for '{entity_id}': {source}")]
    Load { entity_id: String, source: StoreError },

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Request body handed to [`EntitySubmitter::submit_entity`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Existing entity being updated, `None` when creating
    pub entity_id: Option<String>,
    pub translations: SubmissionPayload,
    /// Non-localized form fields (images, prices, flags, ...)
    pub fields: Map<String, Value>,
}

/// Coordinator for one open multi-locale form.
///
/// Owned by the form; dropping it discards every unsaved draft.
pub struct EntityEditor {
    /// Existing entity id, if editing
    entity_id: Option<String>,
    drafts: DraftCache,
    /// Non-localized fields
    shared_fields: Map<String, Value>,
    /// Empty accepts any field name
    localized_fields: Vec<String>,
    catalog: Arc<dyn LocaleCatalog>,
}

impl std::fmt::Debug for EntityEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityEditor")
            .field("entity_id", &self.entity_id)
            .field("drafts", &self.drafts)
            .field("shared_fields", &self.shared_fields)
            .field("catalog", &"<dyn LocaleCatalog>")
            .finish_non_exhaustive()
    }
}

impl EntityEditor {
    /// Opens an empty form for a new entity.
    ///
    /// # Errors
    /// `original_locale` is not offered by `catalog`.
    pub fn open(
        original_locale: LocaleCode,
        catalog: Arc<dyn LocaleCatalog>,
        settings: &EngineSettings,
    ) -> Result<Self, EditorError> {
        ensure_offered(catalog.as_ref(), &original_locale)?;
        Ok(Self {
            entity_id: None,
            drafts: DraftCache::new(original_locale, settings.required_fields.clone()),
            shared_fields: Map::new(),
            localized_fields: settings.localized_fields.clone(),
            catalog,
        })
    }

    /// Opens an empty form on the configured `defaultLocale`.
    ///
    /// # Errors
    /// The default locale is not offered by `catalog`.
    pub fn open_default(
        catalog: Arc<dyn LocaleCatalog>,
        settings: &EngineSettings,
    ) -> Result<Self, EditorError> {
        Self::open(LocaleCode::new(settings.default_locale.as_str()), catalog, settings)
    }

    /// Opens the form for an existing entity, seeded with its stored translations.
    ///
    /// # Errors
    /// - `original_locale` is not offered by `catalog`
    /// - the translation fetch failed
    pub async fn open_existing(
        entity_id: &str,
        original_locale: LocaleCode,
        source: &dyn TranslationSource,
        catalog: Arc<dyn LocaleCatalog>,
        settings: &EngineSettings,
    ) -> Result<Self, EditorError> {
        ensure_offered(catalog.as_ref(), &original_locale)?;

        let translations = source
            .load_translations(entity_id)
            .await
            .map_err(|source| EditorError::Load { entity_id: entity_id.to_string(), source })?;

        Ok(Self {
            entity_id: Some(entity_id.to_string()),
            drafts: DraftCache::seeded(
                original_locale,
                translations,
                settings.required_fields.clone(),
            ),
            shared_fields: Map::new(),
            localized_fields: settings.localized_fields.clone(),
            catalog,
        })
    }

    #[must_use]
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    #[must_use]
    pub const fn drafts(&self) -> &DraftCache {
        &self.drafts
    }

    #[must_use]
    pub const fn active_locale(&self) -> &LocaleCode {
        self.drafts.active_locale()
    }

    /// Locale-select change.
    ///
    /// # Errors
    /// The locale is not offered. Nothing is changed.
    pub fn switch_locale(&mut self, locale: LocaleCode) -> Result<(), EditorError> {
        ensure_offered(self.catalog.as_ref(), &locale)?;
        self.drafts.switch_locale(locale);
        Ok(())
    }

    /// Input binding for a localized field of the active locale.
    ///
    /// # Errors
    /// The field is not one of the configured localized fields.
    pub fn set_field(
        &mut self,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<(), EditorError> {
        if !self.localized_fields.is_empty() && !self.localized_fields.iter().any(|f| f == field) {
            tracing::error!(field, "Edit of a field that is not localized");
            return Err(DraftError::UnknownField { field: field.to_string() }.into());
        }
        self.drafts.edit_active_field(field, value);
        Ok(())
    }

    /// Input binding for a non-localized field.
    pub fn set_shared_field(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.shared_fields.insert(field.into(), value.into());
    }

    /// The request body a save click would send right now.
    #[must_use]
    pub fn submission(&self) -> Submission {
        Submission {
            entity_id: self.entity_id.clone(),
            translations: self.drafts.flatten(),
            fields: self.shared_fields.clone(),
        }
    }

    /// Save click: one call to the submit collaborator.
    ///
    /// On rejection every locale's draft is kept so the user can fix and resubmit.
    ///
    /// # Errors
    /// The collaborator rejected the submission.
    pub async fn submit<S>(&self, submitter: &S) -> Result<S::Entity, EditorError>
    where
        S: EntitySubmitter + ?Sized,
    {
        let submission = self.submission();
        tracing::debug!(
            entity_id = ?self.entity_id,
            locales = submission.translations.len(),
            "Submitting entity"
        );

        submitter.submit_entity(&submission).await.map_err(|error| {
            tracing::warn!(%error, "Submission rejected");
            EditorError::Submit(error)
        })
    }
}

fn ensure_offered(catalog: &dyn LocaleCatalog, locale: &LocaleCode) -> Result<(), DraftError> {
    if catalog.is_offered(locale) {
        Ok(())
    } else {
        tracing::error!(%locale, "Locale is not offered by this form");
        Err(DraftError::UnknownLocale(locale.clone()))
    }
}
