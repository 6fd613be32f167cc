//! Configuration management: layering settings sources and writing back.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    ConfigScope,
    TranslationManagerSettings,
    loader,
};
use crate::locale::LocaleFolder;

/// Manages the effective settings.
///
/// Sources, lowest precedence first: user file, workspace file, settings
/// pushed by the client.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Effective settings
    current_settings: TranslationManagerSettings,

    /// Workspace root path
    workspace_root: Option<PathBuf>,

    /// User configuration file path
    user_config_path: Option<PathBuf>,

    /// Settings received via `initializationOptions` or `didChangeConfiguration`
    client_settings: Option<TranslationManagerSettings>,
}

impl ConfigManager {
    /// Creates a manager using the platform's user configuration directory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_user_config_path(loader::default_user_config_path())
    }

    /// Creates a manager reading user settings from `user_config_path`.
    #[must_use]
    pub fn with_user_config_path(user_config_path: Option<PathBuf>) -> Self {
        Self {
            current_settings: TranslationManagerSettings::default(),
            workspace_root: None,
            user_config_path,
            client_settings: None,
        }
    }

    /// Loads settings for a workspace.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        self.workspace_root = workspace_root;
        self.reload()
    }

    /// Re-reads the configuration files and recomputes the effective settings.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let mut settings = TranslationManagerSettings::default();

        if let Some(path) = &self.user_config_path
            && let Some(user) = loader::load_from_file(path)?
        {
            tracing::debug!("Loaded user settings: {:?}", user);
            settings = settings.merged_with(user);
        }

        if let Some(root) = &self.workspace_root
            && let Some(workspace) = loader::load_from_file(&loader::workspace_config_path(root))?
        {
            tracing::debug!("Loaded workspace settings: {:?}", workspace);
            settings = settings.merged_with(workspace);
        }

        if let Some(client) = &self.client_settings {
            settings = settings.merged_with(client.clone());
        }

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Applies settings pushed by the client (`didChangeConfiguration`).
    ///
    /// # Errors
    /// Returns an error if the new settings are invalid; the previous settings are kept.
    pub fn update_settings(
        &mut self,
        new_settings: TranslationManagerSettings,
    ) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        let previous = self.client_settings.replace(new_settings);
        if let Err(error) = self.reload() {
            self.client_settings = previous;
            return Err(error);
        }

        tracing::debug!("Settings updated successfully");
        Ok(())
    }

    /// Persists `folder` as the locale folder in `scope` and makes it effective.
    ///
    /// A locale folder previously pushed by the client no longer overrides the
    /// saved value.
    ///
    /// # Errors
    /// - No workspace is open for [`ConfigScope::Workspace`], or no user
    ///   configuration directory exists for [`ConfigScope::User`]
    /// - The configuration file cannot be read or written
    pub fn update_locale_folder(
        &mut self,
        folder: &LocaleFolder,
        scope: ConfigScope,
    ) -> Result<PathBuf, ConfigError> {
        let path = self.config_path(scope).ok_or(match scope {
            ConfigScope::Workspace => ConfigError::NoWorkspace,
            ConfigScope::User => ConfigError::NoUserConfigDir,
        })?;
        loader::write_locale_folder(&path, &folder.to_setting())?;

        if let Some(client) = &mut self.client_settings {
            client.locale_folder = None;
        }
        self.reload()?;

        Ok(path)
    }

    /// The scope a setting change should be written to: the workspace when one is open.
    #[must_use]
    pub const fn write_scope(&self) -> ConfigScope {
        if self.workspace_root.is_some() { ConfigScope::Workspace } else { ConfigScope::User }
    }

    /// The configuration file backing `scope`.
    #[must_use]
    pub fn config_path(&self, scope: ConfigScope) -> Option<PathBuf> {
        match scope {
            ConfigScope::Workspace => self.workspace_root.as_deref().map(loader::workspace_config_path),
            ConfigScope::User => self.user_config_path.clone(),
        }
    }

    /// Returns true if `path` is one of the configuration files this manager reads.
    #[must_use]
    pub fn is_config_file(&self, path: &Path) -> bool {
        self.config_path(ConfigScope::Workspace).is_some_and(|p| p == path)
            || self.user_config_path.as_deref().is_some_and(|p| p == path)
    }

    /// Get current settings
    #[must_use]
    pub const fn get_settings(&self) -> &TranslationManagerSettings {
        &self.current_settings
    }

    /// Get workspace root
    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }
}
