//! Dialect Registry
//!
//! Simple in-memory registry of dialect definitions. Ships with an embedded
//! Blogger dialect and can overlay definitions from user directories.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};

use super::schema::{Dialect, DialectFile, ElementDef};

/// Simple in-memory dialect registry
#[derive(Debug, Clone)]
pub struct DialectRegistry {
    dialects: HashMap<String, Dialect>,
    active_dialect: Option<String>,
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectRegistry {
    pub fn new() -> Self {
        Self {
            dialects: HashMap::new(),
            active_dialect: None,
        }
    }

    /// Add a dialect to the registry
    pub fn add_dialect(&mut self, dialect: Dialect) {
        self.dialects.insert(dialect.name.clone(), dialect);
    }

    /// Set the active dialect
    pub fn set_active_dialect(&mut self, name: &str) -> bool {
        if self.dialects.contains_key(name) {
            self.active_dialect = Some(name.to_string());
            true
        } else {
            false
        }
    }

    /// Get the currently active dialect
    pub fn get_active_dialect(&self) -> Option<&Dialect> {
        self.active_dialect
            .as_ref()
            .and_then(|name| self.dialects.get(name))
    }

    /// List all available dialects
    pub fn list_dialects(&self) -> Vec<&str> {
        self.dialects.keys().map(|s| s.as_str()).collect()
    }

    /// Get an element definition from the active dialect
    pub fn get_element(&self, name: &str) -> Option<&ElementDef> {
        self.get_active_dialect()?.elements.get(name)
    }

    /// Add the embedded Blogger dialect with rich element definitions
    pub fn add_embedded_blogger_dialect(&mut self) {
        let embedded_toml = include_str!("../../resources/dialects/blogger.toml");

        match toml::from_str::<DialectFile>(embedded_toml) {
            Ok(dialect_file) => {
                let dialect = Dialect::from(dialect_file);
                self.add_dialect(dialect);
            }
            Err(e) => {
                // Fallback to minimal dialect if parsing fails
                log::warn!(
                    "Failed to parse embedded Blogger dialect: {}. Using minimal fallback.",
                    e
                );
                self.add_minimal_blogger_dialect();
            }
        }
    }

    /// Add a minimal fallback Blogger dialect in case embedded TOML parsing fails
    fn add_minimal_blogger_dialect(&mut self) {
        let mut elements = HashMap::new();

        elements.insert(
            "b:skin".to_string(),
            ElementDef {
                name: "b:skin".to_string(),
                description_short: Some("Theme skin section".to_string()),
                description_long: Some(
                    "CDATA block holding the theme CSS and variable definitions".to_string(),
                ),
                self_closing: false,
                attributes: None,
            },
        );

        elements.insert(
            "b:widget".to_string(),
            ElementDef {
                name: "b:widget".to_string(),
                description_short: Some("Widget instance".to_string()),
                description_long: Some("A configurable widget placed inside a section".to_string()),
                self_closing: false,
                attributes: None,
            },
        );

        let dialect = Dialect {
            name: "blogger".to_string(),
            version: Some("minimal-fallback".to_string()),
            description: Some("Minimal fallback Blogger dialect".to_string()),
            elements,
        };

        self.add_dialect(dialect);
    }

    /// Load dialect definition files from a directory, overriding any
    /// already-registered dialect with the same name
    pub fn load_from_directory(&mut self, dir: &Path) -> Result<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read dialect directory: {}", dir.display()))?;

        let mut loaded = 0;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                continue;
            }

            match self.load_dialect_file(&path) {
                Ok(()) => loaded += 1,
                Err(e) => {
                    log::warn!("Failed to load dialect file {}: {}", path.display(), e);
                }
            }
        }

        Ok(loaded)
    }

    /// Load a single dialect file
    fn load_dialect_file(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dialect file: {}", path.display()))?;

        let file: DialectFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse dialect TOML: {}", path.display()))?;

        self.add_dialect(Dialect::from(file));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::schema::DialectMeta;

    fn test_dialect(name: &str) -> Dialect {
        Dialect::from(DialectFile {
            dialect: DialectMeta {
                name: name.to_string(),
                version: None,
                description: None,
            },
            elements: vec![ElementDef {
                name: "b:if".to_string(),
                description_short: Some("Conditional block".to_string()),
                description_long: None,
                self_closing: false,
                attributes: None,
            }],
        })
    }

    #[test]
    fn test_registry_creation() {
        let registry = DialectRegistry::new();
        assert!(registry.list_dialects().is_empty());
        assert!(registry.get_active_dialect().is_none());
    }

    #[test]
    fn test_add_and_activate_dialect() {
        let mut registry = DialectRegistry::new();
        registry.add_dialect(test_dialect("test"));

        assert!(registry.set_active_dialect("test"));
        assert_eq!(registry.get_active_dialect().map(|d| d.name.as_str()), Some("test"));
    }

    #[test]
    fn test_get_element() {
        let mut registry = DialectRegistry::new();
        registry.add_dialect(test_dialect("test"));
        assert!(registry.set_active_dialect("test"));

        let elem = registry.get_element("b:if");
        assert!(elem.is_some());
        assert_eq!(
            elem.and_then(|e| e.description_short.clone()),
            Some("Conditional block".to_string())
        );
        assert!(registry.get_element("b:unknown").is_none());
    }

    #[test]
    fn test_nonexistent_dialect() {
        let mut registry = DialectRegistry::new();
        assert!(!registry.set_active_dialect("nonexistent"));
        assert!(registry.get_element("b:if").is_none());
    }

    #[test]
    fn test_embedded_blogger_dialect() {
        let mut registry = DialectRegistry::new();
        registry.add_embedded_blogger_dialect();
        assert!(registry.set_active_dialect("blogger"));

        let skin = registry.get_element("b:skin").expect("b:skin defined");
        assert!(skin.description_short.is_some());

        let widget = registry.get_element("b:widget").expect("b:widget defined");
        assert!(!widget.required_attributes().is_empty());
    }
}
