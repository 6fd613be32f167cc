//! Execute Command handler
//!
//! Handles `workspace/executeCommand` requests for the server's commands.

use serde::Deserialize;
use serde_json::Value;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::{
    ExecuteCommandParams,
    Range,
    Url,
};

use super::super::backend::Backend;
use super::super::commands::add_message::{
    self,
    add_localized_message,
};
use super::super::ui::LspEditorUi;

/// Handles a `workspace/executeCommand` request.
#[allow(clippy::single_match_else)]
pub async fn handle_execute_command(
    backend: &Backend,
    params: ExecuteCommandParams,
) -> Result<Option<Value>> {
    tracing::debug!(command = %params.command, "Execute Command request");

    match params.command.as_str() {
        add_message::COMMAND => handle_add_localized_message(backend, params.arguments).await,
        _ => {
            tracing::warn!("Unknown command: {}", params.command);
            Ok(None)
        }
    }
}

/// Optional first argument of `translationManager.addLocalizedMessage`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddLocalizedMessageArgs {
    /// Document holding the selection
    uri: Option<Url>,
    /// Selection used as the default message key
    range: Option<Range>,
    /// Selected text, taking precedence over `uri` and `range`
    selected_text: Option<String>,
}

/// Runs `translationManager.addLocalizedMessage`.
///
/// # Arguments
/// * `arguments[0]` - optional `AddLocalizedMessageArgs` object
///
/// Returns the report of the run, or `null` when it was aborted.
async fn handle_add_localized_message(
    backend: &Backend,
    arguments: Vec<Value>,
) -> Result<Option<Value>> {
    let args = match arguments.into_iter().next() {
        Some(first_arg) => serde_json::from_value(first_arg).unwrap_or_else(|e| {
            tracing::warn!("Invalid arguments for {}: {}", add_message::COMMAND, e);
            AddLocalizedMessageArgs::default()
        }),
        None => AddLocalizedMessageArgs::default(),
    };

    let default_key = selected_key(backend, args).await;
    let ui = LspEditorUi::new(backend.client.clone());

    let report = add_localized_message(&ui, &backend.config_manager, default_key).await;
    Ok(report.and_then(|report| serde_json::to_value(report).ok()))
}

/// The selected text to pre-fill the key prompt with, trimmed.
async fn selected_key(backend: &Backend, args: AddLocalizedMessageArgs) -> Option<String> {
    let selected = match (args.selected_text, args.uri, args.range) {
        (Some(text), _, _) => Some(text),
        (None, Some(uri), Some(range)) => backend.state.text_in_document(&uri, range).await,
        _ => None,
    }?;

    let trimmed = selected.trim();
    if trimmed.is_empty() || trimmed.contains('\n') { None } else { Some(trimmed.to_string()) }
}
