//! Dialect Schema Types
//!
//! Simple types for dialect definition files.

use serde::Deserialize;
use std::collections::HashMap;

/// Root dialect file structure (matches TOML)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DialectFile {
    pub dialect: DialectMeta,
    pub elements: Vec<ElementDef>,
}

/// Dialect metadata
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DialectMeta {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
}

/// Runtime dialect (optimized for lookups)
#[derive(Debug, Clone, PartialEq)]
pub struct Dialect {
    pub name: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub elements: HashMap<String, ElementDef>,
}

/// Template element definition
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ElementDef {
    pub name: String,
    pub description_short: Option<String>,
    pub description_long: Option<String>,
    /// Element is written `<name .../>` and never takes children
    #[serde(default)]
    pub self_closing: bool,
    pub attributes: Option<Vec<AttributeDef>>,
}

/// Element attribute definition
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AttributeDef {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    pub description: String,
}

impl From<DialectFile> for Dialect {
    fn from(file: DialectFile) -> Self {
        // Convert to HashMap for fast lookups
        let elements = file
            .elements
            .into_iter()
            .map(|elem| (elem.name.clone(), elem))
            .collect();

        Self {
            name: file.dialect.name,
            version: file.dialect.version,
            description: file.dialect.description,
            elements,
        }
    }
}

impl ElementDef {
    /// Find an attribute definition by name
    pub fn find_attribute(&self, name: &str) -> Option<&AttributeDef> {
        self.attributes
            .as_ref()?
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
    }

    /// Get all required attributes for this element
    pub fn required_attributes(&self) -> Vec<&AttributeDef> {
        self.attributes
            .as_ref()
            .map(|attrs| attrs.iter().filter(|a| a.required).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_file() {
        let file = DialectFile {
            dialect: DialectMeta {
                name: "blogger".to_string(),
                version: Some("2".to_string()),
                description: None,
            },
            elements: vec![ElementDef {
                name: "b:skin".to_string(),
                description_short: Some("Theme skin".to_string()),
                description_long: None,
                self_closing: false,
                attributes: None,
            }],
        };

        let dialect = Dialect::from(file);
        assert_eq!(dialect.name, "blogger");
        assert_eq!(dialect.elements.len(), 1);
        assert!(dialect.elements.contains_key("b:skin"));
    }

    #[test]
    fn test_find_attribute() {
        let elem = ElementDef {
            name: "b:widget".to_string(),
            description_short: None,
            description_long: None,
            self_closing: false,
            attributes: Some(vec![AttributeDef {
                name: "id".to_string(),
                required: true,
                description: "Unique widget identifier".to_string(),
            }]),
        };

        assert!(elem.find_attribute("id").is_some());
        assert!(elem.find_attribute("ID").is_some());
        assert!(elem.find_attribute("title").is_none());
    }

    #[test]
    fn test_required_attributes() {
        let elem = ElementDef {
            name: "b:include".to_string(),
            description_short: None,
            description_long: None,
            self_closing: true,
            attributes: Some(vec![
                AttributeDef {
                    name: "name".to_string(),
                    required: true,
                    description: "Includable to render".to_string(),
                },
                AttributeDef {
                    name: "data".to_string(),
                    required: false,
                    description: "Data passed to the includable".to_string(),
                },
            ]),
        };

        let required = elem.required_attributes();
        assert_eq!(required.len(), 1);
        assert_eq!(required[0].name, "name");
    }

    #[test]
    fn test_parse_dialect_toml() {
        let toml_content = r#"
[dialect]
name = "test"
version = "1"

[[elements]]
name = "b:if"
description_short = "Conditional block"

[[elements.attributes]]
name = "cond"
required = true
description = "Condition expression"
"#;

        let file: DialectFile = toml::from_str(toml_content).expect("parse dialect TOML");
        let dialect = Dialect::from(file);
        let elem = dialect.elements.get("b:if").expect("b:if element");
        assert_eq!(elem.required_attributes().len(), 1);
    }
}
