//! One locale's in-progress field values.

use std::collections::BTreeMap;

use serde::{
    Deserialize,
    Serialize,
};

use crate::types::FieldValue;

/// Partial set of named fields edited for a single locale (e.g. `title`, `description`).
///
/// Fields are kept sorted by name so serialized request bodies are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl DraftRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Text value of `field`, if it holds text.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(FieldValue::as_text)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// True when no field has ever been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when every required field is missing or blank.
    ///
    /// With no required fields, a record is blank when every field it holds is blank.
    #[must_use]
    pub fn is_blank(&self, required: &[String]) -> bool {
        if required.is_empty() {
            return self.fields.values().all(FieldValue::is_blank);
        }
        required.iter().all(|field| self.get(field).is_none_or(FieldValue::is_blank))
    }
}

impl<K, V> FromIterator<(K, V)> for DraftRecord
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self { fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    fn required(fields: &[&str]) -> Vec<String> {
        fields.iter().map(ToString::to_string).collect()
    }

    #[rstest]
    #[case::missing_title(DraftRecord::new().with("description", "Open daily"), true)]
    #[case::blank_title(DraftRecord::new().with("title", "   "), true)]
    #[case::filled_title(DraftRecord::new().with("title", "Gym"), false)]
    #[case::flag_title(DraftRecord::new().with("title", false), false)]
    #[case::empty_record(DraftRecord::new(), true)]
    fn test_is_blank_with_title_required(#[case] record: DraftRecord, #[case] expected: bool) {
        assert_that!(record.is_blank(&required(&["title"])), eq(expected));
    }

    #[rstest]
    fn is_blank_needs_every_required_field_blank() {
        let record = DraftRecord::new().with("title", "").with("slug", "gym");

        assert_that!(record.is_blank(&required(&["title", "slug"])), eq(false));
        assert_that!(record.is_blank(&required(&["title"])), eq(true));
    }

    #[rstest]
    fn is_blank_without_required_fields_checks_all_fields() {
        assert_that!(DraftRecord::new().with("a", " ").is_blank(&[]), eq(true));
        assert_that!(DraftRecord::new().with("a", " ").with("b", "x").is_blank(&[]), eq(false));
    }

    #[rstest]
    fn set_overwrites_previous_value() {
        let mut record = DraftRecord::new().with("title", "Gym");
        record.set("title", "Gymnasium");

        assert_that!(record.text("title"), some(eq("Gymnasium")));
    }

    #[rstest]
    fn serializes_as_sorted_object() {
        let record: DraftRecord =
            [("title", FieldValue::from("Gym")), ("active", FieldValue::from(true))]
                .into_iter()
                .collect();

        let json = serde_json::to_string(&record).unwrap();

        assert_that!(json, eq(r#"{"active":true,"title":"Gym"}"#));
    }
}
