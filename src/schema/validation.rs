//! Record validation against a [`Schema`]

use super::types::{PropertyType, Schema};
use chrono::DateTime;
use serde_json::Value;

/// One mismatch between a record and its schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// JSONPath-like location, e.g. `$.attributes.rtl`
    pub path: String,
    /// What went wrong
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

impl Schema {
    /// Validate a record, returning every mismatch found
    ///
    /// Undeclared fields are allowed. Optional fields may be null.
    pub fn validate(&self, record: &Value) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        validate_object(self, record, "$", &mut errors);
        errors
    }

    /// Whether a record satisfies the schema
    pub fn is_valid(&self, record: &Value) -> bool {
        self.validate(record).is_empty()
    }
}

fn push(errors: &mut Vec<ValidationError>, path: &str, message: impl Into<String>) {
    errors.push(ValidationError {
        path: path.to_string(),
        message: message.into(),
    });
}

fn validate_object(schema: &Schema, value: &Value, path: &str, errors: &mut Vec<ValidationError>) {
    let Some(object) = value.as_object() else {
        push(errors, path, format!("expected object, found {}", kind(value)));
        return;
    };

    for property in schema.properties() {
        let field_path = format!("{path}.{}", property.name);
        match object.get(&property.name) {
            None if property.required => push(errors, &field_path, "missing required property"),
            None => {}
            Some(Value::Null) if property.required => {
                push(errors, &field_path, "required property is null");
            }
            Some(Value::Null) => {}
            Some(v) => validate_value(&property.ty, v, &field_path, errors),
        }
    }
}

fn validate_value(ty: &PropertyType, value: &Value, path: &str, errors: &mut Vec<ValidationError>) {
    match ty {
        PropertyType::String => {
            if !value.is_string() {
                push(errors, path, format!("expected string, found {}", kind(value)));
            }
        }
        PropertyType::Boolean => {
            if !value.is_boolean() {
                push(errors, path, format!("expected boolean, found {}", kind(value)));
            }
        }
        PropertyType::DateTime => match value.as_str() {
            Some(s) if DateTime::parse_from_rfc3339(s).is_ok() => {}
            Some(s) => push(errors, path, format!("'{s}' is not an RFC 3339 date-time")),
            None => push(errors, path, format!("expected string, found {}", kind(value))),
        },
        PropertyType::Object(schema) => validate_object(schema, value, path, errors),
        PropertyType::Array(item) => match value.as_array() {
            Some(items) => {
                for (i, v) in items.iter().enumerate() {
                    validate_value(item, v, &format!("{path}[{i}]"), errors);
                }
            }
            None => push(errors, path, format!("expected array, found {}", kind(value))),
        },
        PropertyType::Map(inner) => match value.as_object() {
            Some(map) => {
                for (k, v) in map {
                    validate_value(inner, v, &format!("{path}.{k}"), errors);
                }
            }
            None => push(errors, path, format!("expected object, found {}", kind(value))),
        },
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
