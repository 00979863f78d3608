//! Stream schema module
//!
//! Schemas are immutable trees declared once per stream.
//!
//! # Features
//!
//! - **Typed Properties**: string, boolean, date-time, object, array, map
//! - **JSON Schema Rendering**: for SCHEMA messages and the catalog
//! - **Record Validation**: required fields and types, recursively

mod types;
mod validation;

pub use types::{Property, PropertyType, Schema};
pub use validation::ValidationError;
