//! LSP lifecycle handlers: `initialize`, `initialized`, `shutdown`.

use std::path::PathBuf;

use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    ExecuteCommandOptions,
    InitializeParams,
    InitializeResult,
    InitializedParams,
    MessageType,
    OneOf,
    ServerCapabilities,
    ServerInfo,
    TextDocumentSyncCapability,
    TextDocumentSyncKind,
    WorkDoneProgressOptions,
    WorkspaceFoldersServerCapabilities,
    WorkspaceServerCapabilities,
};

use super::super::backend::Backend;
use super::super::commands;
use crate::config::TranslationManagerSettings;

pub async fn handle_initialize(
    backend: &Backend,
    params: InitializeParams,
) -> Result<InitializeResult> {
    let workspace_root = workspace_root(&params);

    let mut config_manager = backend.config_manager.lock().await;
    if let Err(error) = config_manager.load_settings(workspace_root) {
        tracing::error!("Configuration error during initialize: {}", error);
    }
    if let Some(options) = params.initialization_options {
        match TranslationManagerSettings::from_client_value(options) {
            Ok(settings) => {
                if let Err(error) = config_manager.update_settings(settings) {
                    tracing::error!(%error, "Invalid initialization options");
                }
            }
            Err(error) => tracing::warn!(%error, "Ignoring malformed initialization options"),
        }
    }
    drop(config_manager);

    Ok(InitializeResult {
        server_info: Some(ServerInfo {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: Some(env!("CARGO_PKG_VERSION").to_string()),
        }),
        capabilities: ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
            execute_command_provider: Some(ExecuteCommandOptions {
                commands: commands::all().iter().map(ToString::to_string).collect(),
                work_done_progress_options: WorkDoneProgressOptions::default(),
            }),
            workspace: Some(WorkspaceServerCapabilities {
                workspace_folders: Some(WorkspaceFoldersServerCapabilities {
                    supported: Some(true),
                    change_notifications: Some(OneOf::Left(true)),
                }),
                file_operations: None,
            }),
            ..ServerCapabilities::default()
        },
    })
}

/// The first workspace folder, falling back to the deprecated `rootUri`.
#[allow(deprecated)]
fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .map(|folder| &folder.uri)
        .or(params.root_uri.as_ref())
        .and_then(Backend::uri_to_path)
}

pub async fn handle_initialized(backend: &Backend, _: InitializedParams) {
    backend.client.log_message(MessageType::INFO, "Translation Manager initialized").await;

    if let Ok(workspace_folders) = backend.get_workspace_folders().await
        && workspace_folders.len() > 1
    {
        tracing::info!(
            count = workspace_folders.len(),
            "Multiple workspace folders open, using the first one for settings"
        );
    }

    backend.register_file_watchers().await;
}

#[allow(clippy::unused_async)]
pub async fn handle_shutdown() -> Result<()> {
    tracing::info!("Shutdown requested");
    Ok(())
}
