use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::dialect::DialectRegistry;
use crate::lsp::document::DocumentState;
use crate::lsp::handlers::{HandleCompletion, HandleDiagnostics, HandleHover};
use crate::Config;

/// The main LSP backend that holds state and implements the Language Server Protocol
pub struct Backend {
    pub client: Client,
    pub dialect_registry: Arc<Mutex<DialectRegistry>>,
    pub documents: Arc<Mutex<HashMap<Url, DocumentState>>>,
    pub config: Config,
}

impl Backend {
    pub fn new(client: Client, config: Config, dialect_registry: DialectRegistry) -> Self {
        let dialect_registry = Arc::new(Mutex::new(dialect_registry));

        Self {
            client,
            dialect_registry,
            documents: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        _: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                hover_provider: Some(HoverProviderCapability::Simple(true)),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    trigger_characters: Some(vec!["<".to_string(), ":".to_string()]),
                    work_done_progress_options: Default::default(),
                    all_commit_characters: None,
                    completion_item: None,
                }),
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "markup-language-server initialized")
            .await;
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        Ok(())
    }

    async fn hover(&self, params: HoverParams) -> tower_lsp::jsonrpc::Result<Option<Hover>> {
        self.handle_hover(params).await
    }

    async fn completion(
        &self,
        params: CompletionParams,
    ) -> tower_lsp::jsonrpc::Result<Option<CompletionResponse>> {
        self.handle_completion(params).await
    }

    // Store opened documents for hover/diagnostics
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let content = params.text_document.text;

        // Create document state with language detection
        let doc_state = self.create_document_state(content);

        let mut docs = self.documents.lock().await;
        docs.insert(uri.clone(), doc_state);
        drop(docs); // Release the lock before calling publish_diagnostics

        // Publish diagnostics for the opened document
        self.publish_diagnostics(uri).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        if let Some(change) = params.content_changes.into_iter().last() {
            // Create new document state with updated content
            let doc_state = self.create_document_state(change.text);

            let mut docs = self.documents.lock().await;
            docs.insert(uri.clone(), doc_state);
            drop(docs); // Release the lock before calling publish_diagnostics

            // Publish updated diagnostics
            self.publish_diagnostics(uri).await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;

        let mut docs = self.documents.lock().await;
        docs.remove(&uri);
        drop(docs);

        // Clear any published diagnostics for the closed document
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::Language;
    use tower_lsp::LspService;

    fn test_config() -> Config {
        Config {
            check_file: None,
            json_output: false,
            dialect_dirs: vec![],
            log_level: "info".to_string(),
        }
    }

    #[tokio::test]
    async fn test_did_close_forgets_document() {
        let (service, socket) = LspService::build(|client| {
            Backend::new(client, test_config(), DialectRegistry::new())
        })
        .finish();
        // Without a connected client the diagnostic publish is a no-op
        drop(socket);

        let backend = service.inner();
        let uri = Url::parse("file:///theme.xml").expect("uri");

        backend.documents.lock().await.insert(
            uri.clone(),
            DocumentState {
                content: "<b:skin></b:skin>".to_string(),
                language: Language::Xml,
            },
        );

        backend
            .did_close(DidCloseTextDocumentParams {
                text_document: TextDocumentIdentifier { uri: uri.clone() },
            })
            .await;

        assert!(!backend.documents.lock().await.contains_key(&uri));
    }
}
