//! Workspace-related handlers.

use tower_lsp::lsp_types::{
    DidChangeConfigurationParams,
    DidChangeWatchedFilesParams,
    DidChangeWorkspaceFoldersParams,
};

use super::super::backend::Backend;
use crate::config::TranslationManagerSettings;

pub async fn handle_did_change_configuration(
    backend: &Backend,
    params: DidChangeConfigurationParams,
) {
    tracing::info!(settings = %params.settings, "didChangeConfiguration received");

    let new_settings = match TranslationManagerSettings::from_client_value(params.settings) {
        Ok(settings) => settings,
        Err(error) => {
            tracing::warn!(%error, "Ignoring malformed configuration");
            return;
        }
    };

    let mut config_manager = backend.config_manager.lock().await;
    match config_manager.update_settings(new_settings) {
        Ok(()) => tracing::info!("configuration updated successfully"),
        Err(error) => tracing::error!(%error, "configuration validation error"),
    }
}

pub async fn handle_did_change_watched_files(
    backend: &Backend,
    params: DidChangeWatchedFilesParams,
) {
    let mut config_manager = backend.config_manager.lock().await;

    let config_changed = params
        .changes
        .iter()
        .filter_map(|change| Backend::uri_to_path(&change.uri))
        .any(|path| config_manager.is_config_file(&path));
    if !config_changed {
        return;
    }

    tracing::debug!("Configuration file changed, reloading");
    if let Err(error) = config_manager.reload() {
        tracing::error!(%error, "Failed to reload configuration");
    }
}

/// Keeps the settings root on the first workspace folder.
///
/// The root only moves when the current one is removed or none was open.
pub async fn handle_did_change_workspace_folders(
    backend: &Backend,
    params: DidChangeWorkspaceFoldersParams,
) {
    let added = params.event.added.first().and_then(|folder| Backend::uri_to_path(&folder.uri));

    let mut config_manager = backend.config_manager.lock().await;
    let current_removed = config_manager.workspace_root().is_some_and(|root| {
        params
            .event
            .removed
            .iter()
            .any(|folder| Backend::uri_to_path(&folder.uri).as_ref() == Some(root))
    });
    let needs_root = config_manager.workspace_root().is_none() && added.is_some();
    if !current_removed && !needs_root {
        return;
    }

    tracing::info!(root = ?added, "Switching workspace root");
    if let Err(error) = config_manager.load_settings(added) {
        tracing::error!(%error, "Failed to load settings for new workspace root");
    }
}
