//! Custom LSP messages for editor UI the base protocol does not cover.
//!
//! The editor extension answers these requests with its native input box,
//! folder picker, and status bar.

use serde::{
    Deserialize,
    Serialize,
};
use tower_lsp::lsp_types::Url;
use tower_lsp::lsp_types::notification::Notification;
use tower_lsp::lsp_types::request::Request;

/// `translationManager/showInputBox`: asks the user for a line of text.
///
/// The result is `null` when the user dismisses the box.
#[derive(Debug)]
pub enum ShowInputBox {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputBoxParams {
    pub prompt: String,
    /// Text pre-filled in the box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl Request for ShowInputBox {
    type Params = InputBoxParams;
    type Result = Option<String>;
    const METHOD: &'static str = "translationManager/showInputBox";
}

/// `translationManager/showOpenDialog`: asks the user to pick files or folders.
///
/// The result is `null` (or empty) when the dialog is cancelled.
#[derive(Debug)]
pub enum ShowOpenDialog {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct OpenDialogParams {
    pub can_select_files: bool,
    pub can_select_folders: bool,
    pub can_select_many: bool,
    pub open_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_uri: Option<Url>,
}

impl OpenDialogParams {
    /// Options for picking exactly one folder.
    #[must_use]
    pub fn single_folder(default_uri: Option<Url>) -> Self {
        Self {
            can_select_files: false,
            can_select_folders: true,
            can_select_many: false,
            open_label: "Open".to_string(),
            default_uri,
        }
    }
}

impl Request for ShowOpenDialog {
    type Params = OpenDialogParams;
    type Result = Option<Vec<Url>>;
    const METHOD: &'static str = "translationManager/showOpenDialog";
}

/// `translationManager/setStatusBarMessage`: shows a message that hides itself.
#[derive(Debug)]
pub enum SetStatusBarMessage {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBarMessageParams {
    pub message: String,
    /// Milliseconds until the message is hidden.
    pub timeout: u32,
}

impl Notification for SetStatusBarMessage {
    type Params = StatusBarMessageParams;
    const METHOD: &'static str = "translationManager/setStatusBarMessage";
}
