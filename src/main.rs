//! Entry point for the Language Server Protocol implementation.

use tower_lsp::{
    LspService,
    Server,
};
use tracing_subscriber::EnvFilter;
use translation_manager_language_server::Backend;
use translation_manager_language_server::config::ConfigManager;

/// Environment variable holding the log filter (e.g. `debug`).
const LOG_ENV: &str = "TRANSLATION_MANAGER_LOG";

#[tokio::main]
async fn main() {
    // stdout carries the protocol, so logs go to stderr.
    let (writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Starting translation manager language server");

    let (stdin, stdout) = (tokio::io::stdin(), tokio::io::stdout());
    let (service, socket) =
        LspService::new(|client| Backend::new(client, ConfigManager::new()));
    Server::new(stdin, stdout, socket).serve(service).await;
}
