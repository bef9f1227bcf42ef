use anyhow::Result;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::dialect::DialectRegistry;
use crate::lsp::backend::Backend;
use crate::Config;

/// Start the LSP server on stdio
pub async fn serve(config: Config) -> Result<()> {
    let dialect_registry = build_registry(&config);

    let (service, socket) =
        LspService::build(move |client| Backend::new(client, config.clone(), dialect_registry))
            .finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}

/// Build the dialect registry: embedded Blogger dialect plus any user
/// overrides found in the configured directories
pub fn build_registry(config: &Config) -> DialectRegistry {
    let mut registry = DialectRegistry::new();
    registry.add_embedded_blogger_dialect();

    for dir in &config.dialect_dirs {
        match registry.load_from_directory(dir) {
            Ok(count) if count > 0 => {
                log::info!("Loaded {} dialect file(s) from {}", count, dir.display());
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("Failed to load dialects from {}: {}", dir.display(), e);
            }
        }
    }

    if !registry.set_active_dialect("blogger") {
        log::warn!("Blogger dialect unavailable, element lookups disabled");
    }

    registry
}
