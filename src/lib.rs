//! Markup Language Server
//!
//! A language server for HTML and Blogger XML template files.
//!
//! This library provides:
//! - Heuristic language detection (plain HTML vs. Blogger XML dialect)
//! - Structural template validation with line/column diagnostics
//! - LSP protocol implementation
//! - Dialect-based element definitions for hover and completion

pub mod config;
pub mod dialect;
pub mod language;
pub mod lsp;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use dialect::{Dialect, DialectRegistry};
pub use language::{detect_language, Language};
pub use validation::{validate_template, Diagnostic, Severity, ValidationResult};
