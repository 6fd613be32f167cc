//! LSP backend.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    DidChangeConfigurationParams,
    DidChangeTextDocumentParams,
    DidChangeWatchedFilesParams,
    DidChangeWatchedFilesRegistrationOptions,
    DidChangeWorkspaceFoldersParams,
    DidCloseTextDocumentParams,
    DidOpenTextDocumentParams,
    ExecuteCommandParams,
    FileSystemWatcher,
    GlobPattern,
    InitializeParams,
    InitializeResult,
    InitializedParams,
    Registration,
    Url,
    WorkspaceFolder,
};
use tower_lsp::{
    Client,
    LanguageServer,
};

use super::handlers;
use super::state::ServerState;
use crate::config::ConfigManager;

/// Watch pattern for the workspace settings file.
const CONFIG_FILE_GLOB: &str = "**/.translation-manager.json";

/// LSP backend
#[derive(Clone)]
pub struct Backend {
    /// LSP client
    pub client: Client,
    /// Settings
    pub config_manager: Arc<Mutex<ConfigManager>>,
    /// Open documents
    pub state: ServerState,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("config_manager", &"<ConfigManager>")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Backend {
    #[must_use]
    pub fn new(client: Client, config_manager: ConfigManager) -> Self {
        Self {
            client,
            config_manager: Arc::new(Mutex::new(config_manager)),
            state: ServerState::new(),
        }
    }

    /// Workspace folders known to the client; empty when none are open.
    ///
    /// # Errors
    /// Communication with the client failed
    pub(crate) async fn get_workspace_folders(&self) -> Result<Vec<WorkspaceFolder>> {
        self.client.workspace_folders().await.map(Option::unwrap_or_default)
    }

    /// Converts a URI to a file path
    pub(crate) fn uri_to_path(uri: &Url) -> Option<PathBuf> {
        uri.to_file_path().ok()
    }

    /// Asks the client to notify us about changes to the settings files.
    pub(crate) async fn register_file_watchers(&self) {
        let mut watchers = vec![FileSystemWatcher {
            glob_pattern: GlobPattern::String(CONFIG_FILE_GLOB.to_string()),
            kind: None,
        }];

        let user_config = {
            let config_manager = self.config_manager.lock().await;
            config_manager.config_path(crate::config::ConfigScope::User)
        };
        if let Some(path) = user_config {
            watchers.push(FileSystemWatcher {
                glob_pattern: GlobPattern::String(path.to_string_lossy().into_owned()),
                kind: None,
            });
        }

        let options = DidChangeWatchedFilesRegistrationOptions { watchers };
        let registration = Registration {
            id: "translation-manager-config-watcher".to_string(),
            method: "workspace/didChangeWatchedFiles".to_string(),
            register_options: serde_json::to_value(options).ok(),
        };

        if let Err(error) = self.client.register_capability(vec![registration]).await {
            tracing::warn!(%error, "Failed to register file watchers");
        } else {
            tracing::debug!("Registered configuration file watchers");
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        handlers::lifecycle::handle_initialize(self, params).await
    }

    async fn initialized(&self, params: InitializedParams) {
        handlers::lifecycle::handle_initialized(self, params).await;
    }

    async fn shutdown(&self) -> Result<()> {
        handlers::lifecycle::handle_shutdown().await
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        handlers::document_sync::handle_did_open(self, params).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        handlers::document_sync::handle_did_change(self, params).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        handlers::document_sync::handle_did_close(self, params).await;
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        handlers::workspace::handle_did_change_configuration(self, params).await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        handlers::workspace::handle_did_change_watched_files(self, params).await;
    }

    async fn did_change_workspace_folders(&self, params: DidChangeWorkspaceFoldersParams) {
        handlers::workspace::handle_did_change_workspace_folders(self, params).await;
    }

    async fn execute_command(&self, params: ExecuteCommandParams) -> Result<Option<Value>> {
        handlers::execute_command::handle_execute_command(self, params).await
    }
}
