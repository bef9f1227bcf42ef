//! Validation Engine
//!
//! Single-pass structural validation for Blogger XML templates: declaration
//! and namespace checks plus a tag-balance scan. Not a real parser - comments
//! and CDATA sections are scanned like everything else, which is part of the
//! behavior contract.

use anyhow::Result;
use regex::Regex;

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic message for a validation issue
///
/// Line and column are 1-based. Diagnostics are ordered by discovery
/// order during the scan, not by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub column: usize,
    pub message: String,
    pub severity: Severity,
}

/// Result of validating a template buffer
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
        }
    }

    pub fn add_error(&mut self, line: usize, column: usize, message: String) {
        self.diagnostics.push(Diagnostic {
            line,
            column,
            message,
            severity: Severity::Error,
        });
    }

    pub fn add_warning(&mut self, line: usize, column: usize, message: String) {
        self.diagnostics.push(Diagnostic {
            line,
            column,
            message,
            severity: Severity::Warning,
        });
    }

    /// A result is valid iff no diagnostic is an error. Warnings are advisory.
    pub fn is_valid(&self) -> bool {
        !self
            .diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

/// Required Blogger namespace declarations, in the exact single-quoted
/// attribute form templates use. These are literal substring checks:
/// double quotes or extra whitespace in the source will not satisfy them.
const REQUIRED_NAMESPACES: [&str; 3] = [
    "xmlns:b='http://www.google.com/2005/gml/b'",
    "xmlns:data='http://www.google.com/2005/gml/data'",
    "xmlns:expr='http://www.google.com/2005/gml/expr'",
];

/// Matches an opening, closing, or self-closing tag. The tag name stops
/// at the first non-word, non-hyphen character, so namespaced tags like
/// `<b:skin>` and `</b:skin>` both resolve to the name "b" and still
/// balance against each other.
const TAG_PATTERN: &str = r"</?[\w-]+[^>]*>";

/// Validate a buffer assumed to be in the Blogger XML dialect.
///
/// Always returns a `ValidationResult`; an internal fault during the scan
/// is converted into a single error diagnostic instead of propagating.
pub fn validate_template(content: &str) -> ValidationResult {
    match run_checks(content) {
        Ok(result) => result,
        Err(fault) => {
            let mut result = ValidationResult::new();
            result.add_error(1, 1, format!("Validation error: {}", fault));
            result
        }
    }
}

fn run_checks(content: &str) -> Result<ValidationResult> {
    let mut result = ValidationResult::new();

    if content.trim().is_empty() {
        result.add_error(1, 1, "Empty content".to_string());
        return Ok(result);
    }

    if !content.contains("<?xml") {
        result.add_warning(1, 1, "Missing XML declaration".to_string());
    }

    if !content.contains("<!DOCTYPE html>") {
        result.add_warning(2, 1, "Missing DOCTYPE declaration".to_string());
    }

    for namespace in REQUIRED_NAMESPACES {
        if !content.contains(namespace) {
            result.add_error(3, 1, format!("Missing required namespace: {}", namespace));
        }
    }

    scan_tag_balance(content, &mut result)?;

    if content.contains("<data:") && !content.contains("b:skin") {
        result.add_warning(
            1,
            1,
            "Blogger data tags found but missing b:skin section".to_string(),
        );
    }

    Ok(result)
}

/// One linear pass over the content, matching tags in document order and
/// balancing them against a stack of open tag names.
fn scan_tag_balance(content: &str, result: &mut ValidationResult) -> Result<()> {
    let tag_re = Regex::new(TAG_PATTERN)?;

    let mut open_tags: Vec<String> = Vec::new();
    let mut line = 1;

    for tag in tag_re.find_iter(content) {
        let before = &content[..tag.start()];
        line = 1 + before.matches('\n').count();

        let text = tag.as_str();
        let name = tag_name(text);

        if text.starts_with("</") {
            // Offset of the match within its line, 1-based
            let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
            let column = tag.start() - line_start + 1;

            let popped = open_tags.pop();
            if popped.as_deref() != Some(name) {
                result.add_error(
                    line,
                    column,
                    format!(
                        "Mismatched closing tag: expected </{}> but found </{}>",
                        popped.as_deref().unwrap_or(""),
                        name
                    ),
                );
            }
        } else if !text.ends_with("/>") {
            open_tags.push(name.to_string());
        }
        // Self-closing tags need no matching close and are never stacked
    }

    if !open_tags.is_empty() {
        result.add_error(line, 1, format!("Unclosed tags: {}", open_tags.join(", ")));
    }

    Ok(())
}

/// Extract the tag name from matched tag text: the run of word characters
/// and hyphens after `<` or `</`.
fn tag_name(tag_text: &str) -> &str {
    let rest = tag_text
        .trim_start_matches('<')
        .trim_start_matches('/');
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(rest.len());
    &rest[..end]
}
