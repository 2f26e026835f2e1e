use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "requiredFields[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettings {
    /// A locale is submitted only when at least one of these is non-blank.
    pub required_fields: Vec<String>,

    /// Fields edited per locale. Empty accepts any field name.
    pub localized_fields: Vec<String>,

    /// Locale a new form opens on.
    pub default_locale: String,

    /// Locales the forms may switch to.
    ///
    /// - `None`: any locale (default)
    /// - `Some([...])`: only the listed locales, in display order
    pub offered_locales: Option<Vec<String>>,

    pub reorder: ReorderSettings,
    pub telemetry: TelemetrySettings,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ReorderSettings {
    /// Upper bound on position writes in flight per batch.
    /// Default: unbounded. `0` is rejected when the file is parsed.
    pub max_concurrent_writes: Option<NonZeroUsize>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TelemetrySettings {
    /// `EnvFilter` directive, e.g. `"info"` or `"draft_reconciler=debug"`.
    pub filter: String,
    /// Write logs to a file in this directory instead of stderr.
    pub log_directory: Option<PathBuf>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self { filter: "info".to_string(), log_directory: None }
    }
}

impl EngineSettings {
    /// # Errors
    /// - Required field list is empty or has empty names
    /// - A required field is not localized
    /// - Default locale is empty or not offered
    /// - Offered locales are empty or duplicated
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.required_fields.is_empty() {
            errors.push(ValidationError::new(
                "requiredFields",
                "At least one required field is needed. Example: [\"title\"]",
            ));
        }

        for (index, field) in self.required_fields.iter().enumerate() {
            if field.trim().is_empty() {
                errors.push(ValidationError::new(
                    format!("requiredFields[{index}]"),
                    "The field name cannot be empty",
                ));
            } else if !self.localized_fields.is_empty() && !self.localized_fields.contains(field) {
                errors.push(ValidationError::new(
                    format!("requiredFields[{index}]"),
                    format!("Required field '{field}' must also be listed in 'localizedFields'"),
                ));
            }
        }

        if self.default_locale.trim().is_empty() {
            errors.push(ValidationError::new(
                "defaultLocale",
                "The locale cannot be empty. Example: \"en\"",
            ));
        }

        if let Some(offered) = &self.offered_locales {
            if offered.is_empty() {
                errors.push(ValidationError::new(
                    "offeredLocales",
                    "At least one locale is required, or remove this field to accept any locale",
                ));
            } else if !offered.contains(&self.default_locale) {
                errors.push(ValidationError::new(
                    "offeredLocales",
                    format!("The default locale '{}' must be offered", self.default_locale),
                ));
            }

            let mut seen = HashSet::new();
            for (index, locale) in offered.iter().enumerate() {
                if !seen.insert(locale) {
                    errors.push(ValidationError::new(
                        format!("offeredLocales[{index}]"),
                        format!("Duplicate locale '{locale}'"),
                    ));
                }
            }
        }

        if self.telemetry.filter.trim().is_empty() {
            errors.push(ValidationError::new(
                "telemetry.filter",
                "The filter cannot be empty. Example: \"info\"",
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            required_fields: vec!["title".to_string()],
            localized_fields: vec!["title".to_string(), "description".to_string()],
            default_locale: "en".to_string(),
            offered_locales: None,
            reorder: ReorderSettings::default(),
            telemetry: TelemetrySettings::default(),
        }
    }
}
