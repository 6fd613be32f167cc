//! Document synchronization handlers.

use tower_lsp::lsp_types::{
    DidChangeTextDocumentParams,
    DidCloseTextDocumentParams,
    DidOpenTextDocumentParams,
};

use super::super::backend::Backend;

pub async fn handle_did_open(backend: &Backend, params: DidOpenTextDocumentParams) {
    let uri = params.text_document.uri;
    tracing::debug!(%uri, "Document opened");

    backend.state.open_document(uri, params.text_document.text).await;
}

pub async fn handle_did_change(backend: &Backend, params: DidChangeTextDocumentParams) {
    let uri = params.text_document.uri;

    // FULL sync: the last change holds the whole text.
    let Some(change) = params.content_changes.into_iter().next_back() else {
        return;
    };

    backend.state.open_document(uri, change.text).await;
}

pub async fn handle_did_close(backend: &Backend, params: DidCloseTextDocumentParams) {
    let uri = params.text_document.uri;
    tracing::debug!(%uri, "Document closed");

    backend.state.close_document(&uri).await;
}
