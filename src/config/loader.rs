//! Reading and writing configuration files.

use std::path::{
    Path,
    PathBuf,
};

use serde_json::{
    Map,
    Value,
};

use super::{
    ConfigError,
    SETTINGS_SECTION,
    TranslationManagerSettings,
};

/// Name of the workspace configuration file.
pub(super) const WORKSPACE_CONFIG_FILE: &str = ".translation-manager.json";

/// Path of the workspace configuration file.
pub(super) fn workspace_config_path(workspace_root: &Path) -> PathBuf {
    workspace_root.join(WORKSPACE_CONFIG_FILE)
}

/// Path of the user configuration file, if the platform has a configuration directory.
pub(super) fn default_user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("translation-manager").join("settings.json"))
}

/// Reads settings from a configuration file.
///
/// The settings may sit at the top level or under `translationManager`.
///
/// # Returns
/// - `Ok(Some(settings))`: the file exists and was parsed
/// - `Ok(None)`: the file does not exist
///
/// # Errors
/// - File read error
/// - JSON parse error
pub(super) fn load_from_file(
    config_path: &Path,
) -> Result<Option<TranslationManagerSettings>, ConfigError> {
    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let value: Value = serde_json::from_str(&content)?;
    let settings = TranslationManagerSettings::from_client_value(value)?;

    Ok(Some(settings))
}

/// Writes `localeFolder` into a configuration file, keeping every other key.
///
/// When the file nests its settings under `translationManager`, the value is
/// written there.
///
/// Missing files and parent directories are created.
///
/// # Errors
/// - The existing file cannot be read or parsed, or is not an object
/// - The file cannot be written
pub(super) fn write_locale_folder(config_path: &Path, locale_folder: &str) -> Result<(), ConfigError> {
    let mut document = if config_path.exists() {
        let content = std::fs::read_to_string(config_path)?;
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => map,
            _ => return Err(ConfigError::NotAnObject(config_path.display().to_string())),
        }
    } else {
        Map::new()
    };

    // A file using the `translationManager` section is updated inside it.
    let target = if document.contains_key(SETTINGS_SECTION) {
        let Some(Value::Object(section)) = document.get_mut(SETTINGS_SECTION) else {
            return Err(ConfigError::NotAnObject(format!(
                "{}#{SETTINGS_SECTION}",
                config_path.display()
            )));
        };
        section
    } else {
        &mut document
    };
    target.insert("localeFolder".to_string(), Value::String(locale_folder.to_string()));

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut content = serde_json::to_string_pretty(&Value::Object(document))?;
    content.push('\n');
    std::fs::write(config_path, content)?;

    tracing::info!(path = %config_path.display(), locale_folder, "Saved locale folder");
    Ok(())
}
