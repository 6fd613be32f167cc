//! Shared state of the language server.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::{
    Range,
    Url,
};

use super::selection::text_in_range;

/// State shared between handlers.
///
/// Cloning is cheap and every clone sees the same documents.
#[derive(Clone, Default)]
pub struct ServerState {
    /// Text of every open document (URI → full text)
    pub documents: Arc<Mutex<HashMap<Url, String>>>,
}

impl ServerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the full text of `uri`, replacing any previous version.
    pub async fn open_document(&self, uri: Url, text: String) {
        self.documents.lock().await.insert(uri, text);
    }

    pub async fn close_document(&self, uri: &Url) {
        self.documents.lock().await.remove(uri);
    }

    /// Text of `range` in the open document `uri`.
    ///
    /// Returns `None` if the document is not open or the range lies outside it.
    pub async fn text_in_document(&self, uri: &Url, range: Range) -> Option<String> {
        let documents = self.documents.lock().await;
        let text = documents.get(uri)?;
        text_in_range(text, range)
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState").field("documents", &"<HashMap<Url, String>>").finish()
    }
}
