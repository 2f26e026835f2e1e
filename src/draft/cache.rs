//! Draft cache for authoring one entity in several locales.

use std::collections::HashMap;

use super::{
    DraftRecord,
    LocalizedRecord,
    SubmissionPayload,
};
use crate::types::{
    FieldValue,
    LocaleCode,
};

/// Holds every locale's unsaved edits while the form shows one locale at a time.
///
/// The active locale's values live in `active_fields` and are never duplicated into
/// `drafts`. A locale's snapshot enters `drafts` when it is switched away from and leaves
/// it again when it becomes active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftCache {
    /// Snapshots of every inactive locale
    drafts: HashMap<LocaleCode, DraftRecord>,
    /// Payload order: original locale first, then first activation order
    order: Vec<LocaleCode>,
    /// Locale currently bound to the form inputs
    active_locale: LocaleCode,
    /// Live values of the active locale
    active_fields: DraftRecord,
    /// Fields that decide whether a locale is submitted at all
    required_fields: Vec<String>,
}

impl DraftCache {
    /// Empty cache for a new entity, starting on `original_locale`.
    #[must_use]
    pub fn new(original_locale: LocaleCode, required_fields: Vec<String>) -> Self {
        Self {
            drafts: HashMap::new(),
            order: vec![original_locale.clone()],
            active_locale: original_locale,
            active_fields: DraftRecord::new(),
            required_fields,
        }
    }

    /// Cache pre-populated with an existing entity's translations.
    ///
    /// `original_locale` becomes active (with an empty record if it has no translation)
    /// and is listed first. Other locales follow in the given order. A locale seeded
    /// twice keeps its last record.
    #[must_use]
    pub fn seeded<I>(
        original_locale: LocaleCode,
        translations: I,
        required_fields: Vec<String>,
    ) -> Self
    where
        I: IntoIterator<Item = (LocaleCode, DraftRecord)>,
    {
        let mut cache = Self::new(original_locale, required_fields);
        for (locale, record) in translations {
            cache.register(&locale);
            cache.drafts.insert(locale, record);
        }
        cache.active_fields = cache.drafts.remove(&cache.active_locale).unwrap_or_default();
        tracing::debug!(
            active = %cache.active_locale,
            locales = cache.order.len(),
            "Seeded draft cache"
        );
        cache
    }

    #[must_use]
    pub const fn active_locale(&self) -> &LocaleCode {
        &self.active_locale
    }

    #[must_use]
    pub const fn active_fields(&self) -> &DraftRecord {
        &self.active_fields
    }

    #[must_use]
    pub fn required_fields(&self) -> &[String] {
        &self.required_fields
    }

    /// Locales known to the cache, in payload order. The active locale is included
    /// even when it has never been switched away from.
    #[must_use]
    pub fn locales(&self) -> Vec<&LocaleCode> {
        let mut locales: Vec<&LocaleCode> = self.order.iter().collect();
        if !self.order.contains(&self.active_locale) {
            locales.push(&self.active_locale);
        }
        locales
    }

    /// Current values for `locale`: the live record when it is active, its snapshot
    /// otherwise.
    #[must_use]
    pub fn draft(&self, locale: &LocaleCode) -> Option<&DraftRecord> {
        if *locale == self.active_locale {
            Some(&self.active_fields)
        } else {
            self.drafts.get(locale)
        }
    }

    /// Makes `new_locale` the locale bound to the form.
    ///
    /// The outgoing locale is snapshotted before the incoming one is loaded; loading
    /// first would lose or overwrite the outgoing edits. Switching to the active locale
    /// leaves the cache as it was.
    pub fn switch_locale(&mut self, new_locale: LocaleCode) {
        let outgoing = std::mem::replace(&mut self.active_locale, new_locale);
        let snapshot = std::mem::take(&mut self.active_fields);

        // Untouched locales stay out of the map.
        if !snapshot.is_empty() {
            self.drafts.insert(outgoing.clone(), snapshot);
        }

        let incoming = self.active_locale.clone();
        self.register(&incoming);
        self.active_fields = self.drafts.remove(&incoming).unwrap_or_default();

        tracing::debug!(from = %outgoing, to = %self.active_locale, "Switched active locale");
    }

    /// Sets one live field of the active locale. Snapshots are not touched.
    pub fn edit_active_field(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.active_fields.set(field, value);
    }

    /// Materializes every locale's draft into submission rows.
    ///
    /// The active locale is merged in as if it had just been switched away from,
    /// without mutating the cache. Locales whose required fields are all blank are
    /// left out.
    #[must_use]
    pub fn flatten(&self) -> SubmissionPayload {
        let rows = self
            .locales()
            .into_iter()
            .filter_map(|locale| {
                let record = self.draft(locale)?;
                if record.is_blank(&self.required_fields) {
                    tracing::debug!(%locale, "Skipping locale with blank required fields");
                    return None;
                }
                Some(LocalizedRecord { locale: locale.clone(), record: record.clone() })
            })
            .collect();

        SubmissionPayload::new(rows)
    }

    /// Appends `locale` to the payload order on first sight.
    fn register(&mut self, locale: &LocaleCode) {
        if !self.order.contains(locale) {
            self.order.push(locale.clone());
        }
    }
}
