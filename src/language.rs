//! Language Detection
//!
//! Heuristic classification of a buffer as plain HTML or the Blogger
//! XML/Atom template dialect. No parsing, just substring sniffing.

/// Marker substrings that indicate the Blogger XML dialect.
///
/// Matched as plain, case-sensitive substrings. Each marker counts once
/// regardless of how often it repeats in the buffer.
const XML_MARKERS: [&str; 8] = [
    "<?xml",
    "xmlns:b=",
    "xmlns:data=",
    "xmlns:expr=",
    "<data:",
    "<b:",
    "expr:",
    "b:version=",
];

/// How many distinct markers must be present before a buffer is
/// classified as XML. A single incidental hit (e.g. "expr:" inside CSS)
/// must not flip an ordinary HTML buffer.
const XML_MARKER_THRESHOLD: usize = 2;

/// Detected buffer language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Html,
    Xml,
}

impl Language {
    /// Identifier as used by editors and the LSP surface
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Html => "html",
            Language::Xml => "xml",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a buffer as HTML or Blogger XML dialect.
///
/// Counts how many distinct dialect markers occur anywhere in the
/// content; at least two independent markers are required to classify
/// as XML. Any string input produces a classification.
pub fn detect_language(content: &str) -> Language {
    let hits = XML_MARKERS
        .iter()
        .filter(|marker| content.contains(**marker))
        .count();

    if hits >= XML_MARKER_THRESHOLD {
        Language::Xml
    } else {
        Language::Html
    }
}
