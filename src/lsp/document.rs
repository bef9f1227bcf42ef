use crate::language::Language;

/// State for each open document
#[derive(Debug)]
pub struct DocumentState {
    pub content: String,
    /// Recomputed from content on every change
    pub language: Language,
}
