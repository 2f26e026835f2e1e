//! Locale-tagged rows produced at submit time.

use serde::{
    Deserialize,
    Serialize,
};

use super::DraftRecord;
use crate::types::LocaleCode;

/// A draft tagged with its locale.
///
/// Serializes flat, e.g. `{"locale": "en", "title": "Gym"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedRecord {
    pub locale: LocaleCode,
    #[serde(flatten)]
    pub record: DraftRecord,
}

/// Ordered rows for one submission, one per locale with content in its required fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionPayload(Vec<LocalizedRecord>);

impl SubmissionPayload {
    #[must_use]
    pub(crate) const fn new(rows: Vec<LocalizedRecord>) -> Self {
        Self(rows)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocalizedRecord> {
        self.0.iter()
    }

    /// Locales in payload order.
    #[must_use]
    pub fn locales(&self) -> Vec<&LocaleCode> {
        self.0.iter().map(|row| &row.locale).collect()
    }

    #[must_use]
    pub fn get(&self, locale: &LocaleCode) -> Option<&DraftRecord> {
        self.0.iter().find(|row| row.locale == *locale).map(|row| &row.record)
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<LocalizedRecord> {
        self.0
    }
}

impl<'a> IntoIterator for &'a SubmissionPayload {
    type Item = &'a LocalizedRecord;
    type IntoIter = std::slice::Iter<'a, LocalizedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn serializes_rows_flat() {
        let payload = SubmissionPayload::new(vec![
            LocalizedRecord {
                locale: LocaleCode::from("en"),
                record: DraftRecord::new().with("title", "Gym"),
            },
            LocalizedRecord {
                locale: LocaleCode::from("fr"),
                record: DraftRecord::new().with("title", "Salle").with("description", "Ouvert"),
            },
        ]);

        let json = serde_json::to_string(&payload).unwrap();

        assert_that!(
            json,
            eq(r#"[{"locale":"en","title":"Gym"},{"locale":"fr","description":"Ouvert","title":"Salle"}]"#)
        );
    }

    #[rstest]
    fn deserializes_rows_flat() {
        let json = r#"[{"locale":"de","title":"Halle","published":true}]"#;

        let payload: SubmissionPayload = serde_json::from_str(json).unwrap();

        let de = payload.get(&LocaleCode::from("de")).unwrap();
        assert_that!(payload.len(), eq(1));
        assert_that!(de.text("title"), some(eq("Halle")));
        assert_eq!(de.get("published"), Some(&crate::types::FieldValue::Flag(true)));
    }
}
