//! Validation Engine
//!
//! Clean separation of structural validation from detection and LSP concerns.

pub mod engine;

pub use engine::{validate_template, Diagnostic, Severity};

// Re-export common types
pub use engine::ValidationResult;
