use serde::{
    Deserialize,
    Serialize,
};
use serde_json::Value;
use thiserror::Error;

use crate::locale::LocaleFolder;

/// Key under which clients nest the settings of this server.
pub const SETTINGS_SECTION: &str = "translationManager";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "localeFolder")
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

    #[error("Failed to access configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Configuration file '{0}' does not contain a JSON object")]
    NotAnObject(String),

    #[error("No workspace is open to store workspace settings in")]
    NoWorkspace,

    #[error("No user configuration directory is available on this system")]
    NoUserConfigDir,
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Where a setting is written back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// `.translation-manager.json` in the workspace root.
    Workspace,
    /// `settings.json` in the user configuration directory.
    User,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSettings {
    pub translation_manager: TranslationManagerSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationManagerSettings {
    /// Folder holding one `<locale>.json` per locale.
    ///
    /// Absolute, or relative to the workspace root (glob syntax allowed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale_folder: Option<String>,
}

impl TranslationManagerSettings {
    /// Parses settings pushed by the client, either bare or nested under `translationManager`.
    ///
    /// # Errors
    /// Returns an error if the value does not match the settings shape.
    pub fn from_client_value(value: Value) -> Result<Self, ConfigError> {
        if value.get(SETTINGS_SECTION).is_some() {
            let wrapped: ServerSettings = serde_json::from_value(value)?;
            Ok(wrapped.translation_manager)
        } else {
            Ok(serde_json::from_value(value)?)
        }
    }

    /// Returns `self` with every field that `overlay` sets replaced by the overlay's value.
    #[must_use]
    pub fn merged_with(self, overlay: Self) -> Self {
        Self { locale_folder: overlay.locale_folder.or(self.locale_folder) }
    }

    /// The configured locale folder, if any.
    #[must_use]
    pub fn locale_folder(&self) -> Option<LocaleFolder> {
        self.locale_folder.as_deref().map(LocaleFolder::parse)
    }

    /// # Errors
    /// - `localeFolder` is empty
    /// - `localeFolder` is relative and not a valid glob base
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Some(folder) = &self.locale_folder {
            if folder.trim().is_empty() {
                errors.push(ValidationError::new(
                    "localeFolder",
                    "The folder cannot be empty. Please specify a folder (e.g., \"src/locales\"), or remove this field",
                ));
            } else if let LocaleFolder::WorkspaceRelative(relative) = LocaleFolder::parse(folder)
                && let Err(e) = globset::Glob::new(&format!("{relative}/*.json"))
            {
                errors.push(ValidationError::new(
                    "localeFolder",
                    format!("Invalid folder pattern '{folder}': {e}"),
                ));
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::expect_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;
    use serde_json::json;

    use super::*;

    #[rstest]
    fn validate_default_settings() {
        let settings = TranslationManagerSettings::default();

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    #[case::absolute("/project/locales")]
    #[case::relative("src/locales")]
    #[case::glob("**/locales")]
    fn validate_valid_locale_folder(#[case] folder: &str) {
        let settings = TranslationManagerSettings { locale_folder: Some(folder.to_string()) };

        assert_that!(settings.validate(), ok(anything()));
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    fn validate_invalid_locale_folder_empty(#[case] folder: &str) {
        let settings = TranslationManagerSettings { locale_folder: Some(folder.to_string()) };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("localeFolder")),
                field!(ValidationError.message, contains_substring("cannot be empty"))
            ]])
        );
    }

    #[rstest]
    fn validate_invalid_locale_folder_glob() {
        let settings =
            TranslationManagerSettings { locale_folder: Some("src/{locales".to_string()) };

        assert_that!(
            settings.validate(),
            err(elements_are![all![
                field!(ValidationError.field_path, eq("localeFolder")),
                field!(ValidationError.message, contains_substring("Invalid folder pattern")),
                field!(ValidationError.message, contains_substring("src/{locales"))
            ]])
        );
    }

    #[rstest]
    fn deserialize_empty_settings() {
        let settings: TranslationManagerSettings = serde_json::from_str("{}").unwrap();

        assert_that!(settings.locale_folder, none());
    }

    #[rstest]
    fn serialize_skips_unset_folder() {
        let value = serde_json::to_value(TranslationManagerSettings::default()).unwrap();

        assert_that!(value, eq(&json!({})));
    }

    #[rstest]
    #[case::bare(json!({ "localeFolder": "src/locales" }))]
    #[case::wrapped(json!({ "translationManager": { "localeFolder": "src/locales" } }))]
    fn from_client_value_accepts_both_shapes(#[case] value: Value) {
        let settings = TranslationManagerSettings::from_client_value(value).unwrap();

        assert_that!(settings.locale_folder, some(eq("src/locales")));
    }

    #[rstest]
    fn from_client_value_rejects_wrong_type() {
        let result = TranslationManagerSettings::from_client_value(json!({ "localeFolder": 42 }));

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[rstest]
    #[case::overlay_wins(Some("base"), Some("overlay"), Some("overlay"))]
    #[case::base_kept(Some("base"), None, Some("base"))]
    #[case::both_unset(None, None, None)]
    fn merged_with_prefers_overlay(
        #[case] base: Option<&str>,
        #[case] overlay: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let base = TranslationManagerSettings { locale_folder: base.map(String::from) };
        let overlay = TranslationManagerSettings { locale_folder: overlay.map(String::from) };

        let merged = base.merged_with(overlay);

        assert_that!(merged.locale_folder.as_deref(), eq(expected));
    }

    #[rstest]
    fn config_error_validation_errors_format() {
        let errors = vec![
            ValidationError::new("localeFolder", "The folder cannot be empty"),
            ValidationError::new("localeFolder", "Invalid folder pattern"),
        ];
        let config_error = ConfigError::ValidationErrors(errors);

        let error_message = format!("{config_error}");
        assert_that!(error_message, contains_substring("Configuration validation failed"));
        assert_that!(error_message, contains_substring("1. localeFolder - The folder cannot be empty"));
        assert_that!(error_message, contains_substring("2. localeFolder - Invalid folder pattern"));
    }
}
