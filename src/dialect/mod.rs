//! Dialect Definitions
//!
//! Element definitions for the Blogger template dialect, used by the LSP
//! hover and completion handlers.

pub mod registry;
pub mod schema;

pub use registry::DialectRegistry;
pub use schema::{AttributeDef, Dialect, DialectFile, ElementDef};
