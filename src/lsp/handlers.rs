use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::*;

use crate::dialect::ElementDef;
use crate::language::{detect_language, Language};
use crate::lsp::backend::Backend;
use crate::lsp::document::DocumentState;
use crate::validation::engine::{validate_template, Severity};

/// Trait for handling hover requests
#[tower_lsp::async_trait]
pub trait HandleHover {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>>;
}

/// Trait for handling completion requests
#[tower_lsp::async_trait]
pub trait HandleCompletion {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>>;
}

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    fn create_document_state(&self, content: String) -> DocumentState;
    async fn publish_diagnostics(&self, uri: Url);
}

#[tower_lsp::async_trait]
impl HandleHover for Backend {
    async fn handle_hover(&self, params: HoverParams) -> LspResult<Option<Hover>> {
        let tdpp = params.text_document_position_params;
        let uri = tdpp.text_document.uri;
        let pos = tdpp.position;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        let line = doc_state.content.lines().nth(pos.line as usize).unwrap_or("");
        let token = match element_token_at(line, pos.character as usize) {
            Some(token) => token,
            None => return Ok(None),
        };

        let registry = self.dialect_registry.lock().await;
        if let Some(elem) = registry.get_element(&token) {
            let m = MarkupContent {
                kind: MarkupKind::Markdown,
                value: element_markdown(elem),
            };
            return Ok(Some(Hover {
                contents: HoverContents::Markup(m),
                range: None,
            }));
        }

        Ok(None)
    }
}

#[tower_lsp::async_trait]
impl HandleCompletion for Backend {
    async fn handle_completion(
        &self,
        params: CompletionParams,
    ) -> LspResult<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let pos = params.text_document_position.position;

        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return Ok(None),
        };

        let line = doc_state.content.lines().nth(pos.line as usize).unwrap_or("");

        // Only complete element names right after an opening angle bracket
        let prefix = match tag_prefix_before(line, pos.character as usize) {
            Some(prefix) => prefix,
            None => return Ok(None),
        };

        let registry = self.dialect_registry.lock().await;
        let active_dialect = match registry.get_active_dialect() {
            Some(dialect) => dialect,
            None => return Ok(None),
        };

        let mut completions = Vec::new();
        for (element_name, elem) in &active_dialect.elements {
            if !element_name.starts_with(&prefix) {
                continue;
            }

            let detail = elem
                .description_short
                .clone()
                .unwrap_or_else(|| "Template element".to_string());

            completions.push(CompletionItem {
                label: element_name.clone(),
                kind: Some(CompletionItemKind::CLASS),
                detail: Some(detail),
                documentation: Some(Documentation::MarkupContent(MarkupContent {
                    kind: MarkupKind::Markdown,
                    value: element_markdown(elem),
                })),
                filter_text: Some(element_name.clone()),
                ..Default::default()
            });
        }

        if completions.is_empty() {
            Ok(None)
        } else {
            Ok(Some(CompletionResponse::Array(completions)))
        }
    }
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Create a new document state with a freshly detected language
    fn create_document_state(&self, content: String) -> DocumentState {
        let language = detect_language(&content);
        DocumentState { content, language }
    }

    /// Publish diagnostics for a document
    async fn publish_diagnostics(&self, uri: Url) {
        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return,
        };

        // HTML buffers get an empty set so stale XML diagnostics clear
        // when a buffer is re-classified after an edit.
        let diagnostics = match doc_state.language {
            Language::Html => Vec::new(),
            Language::Xml => validate_template(&doc_state.content)
                .diagnostics
                .into_iter()
                .map(to_lsp_diagnostic)
                .collect(),
        };
        drop(docs);

        self.client
            .publish_diagnostics(uri, diagnostics, None)
            .await;
    }
}

/// Convert a validation diagnostic to an LSP diagnostic
pub fn to_lsp_diagnostic(diag: crate::validation::engine::Diagnostic) -> Diagnostic {
    let severity = match diag.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
    };

    // Validation positions are 1-based, LSP positions 0-based
    let line = diag.line.saturating_sub(1) as u32;
    let column = diag.column.saturating_sub(1) as u32;

    Diagnostic::new(
        Range::new(Position::new(line, column), Position::new(line, column + 1)),
        Some(severity),
        None,
        Some("markup-ls".to_string()),
        diag.message,
        None,
        None,
    )
}

/// Extract the element token under the cursor, including namespace
/// separators so `b:skin` resolves as one token.
fn element_token_at(line: &str, char_idx: usize) -> Option<String> {
    let chars: Vec<char> = line.chars().collect();
    let char_idx = char_idx.min(chars.len());

    let is_token_char =
        |c: char| c.is_alphanumeric() || c == ':' || c == '-' || c == '_' || c == '.';

    let mut start = char_idx;
    while start > 0 && is_token_char(chars[start - 1]) {
        start -= 1;
    }
    let mut end = char_idx;
    while end < chars.len() && is_token_char(chars[end]) {
        end += 1;
    }

    if start >= end {
        return None;
    }

    Some(chars[start..end].iter().collect())
}

/// The partial element name being typed after the nearest `<`, if the
/// cursor is inside a tag-name position. The cursor index may point
/// past the line or mid-character on multibyte lines; it is clamped
/// back to the nearest char boundary before slicing.
fn tag_prefix_before(line: &str, char_idx: usize) -> Option<String> {
    let mut idx = char_idx.min(line.len());
    while idx > 0 && !line.is_char_boundary(idx) {
        idx -= 1;
    }

    let upto = &line[..idx];
    let open = upto.rfind('<')?;
    let prefix = &upto[open + 1..];

    if prefix
        .chars()
        .all(|c| c.is_alphanumeric() || c == ':' || c == '-' || c == '_')
    {
        Some(prefix.to_string())
    } else {
        None
    }
}

/// Render an element definition as hover/completion markdown
fn element_markdown(elem: &ElementDef) -> String {
    let desc = elem
        .description_long
        .clone()
        .or_else(|| elem.description_short.clone())
        .unwrap_or_else(|| "No description".to_string());

    let mut text = format!("**{}**\n\n{}", elem.name, desc);

    if let Some(attributes) = &elem.attributes {
        if !attributes.is_empty() {
            text.push_str("\n\n**Attributes:**");
            for attr in attributes {
                text.push_str(&format!(
                    "\n- `{}`: {}{}",
                    attr.name,
                    attr.description,
                    if attr.required { " (required)" } else { "" }
                ));
            }
        }
    }

    text
}
