//! The editor UI seen from the command flows.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use tower_lsp::Client;
use tower_lsp::lsp_types::{
    MessageActionItem,
    MessageType,
    Url,
};

use super::protocol::{
    InputBoxParams,
    OpenDialogParams,
    SetStatusBarMessage,
    ShowInputBox,
    ShowOpenDialog,
    StatusBarMessageParams,
};

/// Interactive prompts and messages offered by the editor.
///
/// Every prompt returns `None` when the user cancels it.
#[tower_lsp::async_trait]
pub trait EditorUi: Send + Sync {
    /// Asks for a line of text, pre-filled with `value`.
    async fn show_input_box(&self, prompt: &str, value: Option<&str>) -> Option<String>;

    /// Shows an information message with buttons and returns the chosen one.
    async fn show_information_message(&self, message: &str, actions: &[&str]) -> Option<String>;

    /// Asks for a single folder, starting at `default_folder`.
    async fn show_open_folder_dialog(&self, default_folder: Option<&Path>) -> Option<PathBuf>;

    async fn show_error_message(&self, message: &str);

    async fn show_warning_message(&self, message: &str);

    /// Shows a message that disappears after `timeout_ms`.
    async fn set_status_message(&self, message: &str, timeout_ms: u32);
}

/// [`EditorUi`] backed by an LSP client.
///
/// Failed requests (for example a client without the custom methods) count
/// as cancelled prompts.
#[derive(Clone)]
pub struct LspEditorUi {
    client: Client,
}

impl std::fmt::Debug for LspEditorUi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LspEditorUi").finish_non_exhaustive()
    }
}

impl LspEditorUi {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[tower_lsp::async_trait]
impl EditorUi for LspEditorUi {
    async fn show_input_box(&self, prompt: &str, value: Option<&str>) -> Option<String> {
        let params =
            InputBoxParams { prompt: prompt.to_string(), value: value.map(ToString::to_string) };

        match self.client.send_request::<ShowInputBox>(params).await {
            Ok(answer) => answer,
            Err(error) => {
                tracing::debug!(%error, "showInputBox request failed");
                None
            }
        }
    }

    async fn show_information_message(&self, message: &str, actions: &[&str]) -> Option<String> {
        let actions = actions
            .iter()
            .map(|title| MessageActionItem { title: (*title).to_string(), properties: HashMap::new() })
            .collect();

        match self.client.show_message_request(MessageType::INFO, message, Some(actions)).await {
            Ok(chosen) => chosen.map(|item| item.title),
            Err(error) => {
                tracing::debug!(%error, "showMessageRequest failed");
                None
            }
        }
    }

    async fn show_open_folder_dialog(&self, default_folder: Option<&Path>) -> Option<PathBuf> {
        let default_uri = default_folder.and_then(|path| Url::from_directory_path(path).ok());
        let params = OpenDialogParams::single_folder(default_uri);

        let picked = match self.client.send_request::<ShowOpenDialog>(params).await {
            Ok(picked) => picked,
            Err(error) => {
                tracing::debug!(%error, "showOpenDialog request failed");
                return None;
            }
        };

        let uri = picked?.into_iter().next()?;
        match uri.to_file_path() {
            Ok(path) => Some(path),
            Err(()) => {
                tracing::warn!(%uri, "Picked folder is not a file URI");
                None
            }
        }
    }

    async fn show_error_message(&self, message: &str) {
        tracing::error!("{message}");
        self.client.show_message(MessageType::ERROR, message).await;
    }

    async fn show_warning_message(&self, message: &str) {
        tracing::warn!("{message}");
        self.client.show_message(MessageType::WARNING, message).await;
    }

    async fn set_status_message(&self, message: &str, timeout_ms: u32) {
        tracing::info!("{message}");
        self.client.log_message(MessageType::INFO, message).await;
        self.client
            .send_notification::<SetStatusBarMessage>(StatusBarMessageParams {
                message: message.to_string(),
                timeout: timeout_ms,
            })
            .await;
    }
}
