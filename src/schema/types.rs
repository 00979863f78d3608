//! Schema types

use serde_json::{json, Map, Value};

/// Type of a single property
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyType {
    /// JSON string
    String,
    /// JSON boolean
    Boolean,
    /// RFC 3339 timestamp carried as a string
    DateTime,
    /// Object with declared properties
    Object(Schema),
    /// Array whose items share one type
    Array(Box<PropertyType>),
    /// Object with arbitrary keys whose values share one type
    Map(Box<PropertyType>),
}

impl PropertyType {
    /// Array of the given item type
    pub fn array_of(item: PropertyType) -> Self {
        Self::Array(Box::new(item))
    }

    /// Map with values of the given type
    pub fn map_of(value: PropertyType) -> Self {
        Self::Map(Box::new(value))
    }

    /// JSON Schema type name
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyType::String | PropertyType::DateTime => "string",
            PropertyType::Boolean => "boolean",
            PropertyType::Object(_) | PropertyType::Map(_) => "object",
            PropertyType::Array(_) => "array",
        }
    }

    /// Render as a JSON Schema fragment
    pub fn to_json_schema(&self, nullable: bool) -> Value {
        let type_value = if nullable {
            json!([self.type_name(), "null"])
        } else {
            json!([self.type_name()])
        };

        let mut fragment = Map::new();
        fragment.insert("type".to_string(), type_value);

        match self {
            PropertyType::String | PropertyType::Boolean => {}
            PropertyType::DateTime => {
                fragment.insert("format".to_string(), json!("date-time"));
            }
            PropertyType::Object(schema) => {
                fragment.insert("properties".to_string(), schema.properties_json());
                let required = schema.required_names();
                if !required.is_empty() {
                    fragment.insert("required".to_string(), json!(required));
                }
            }
            PropertyType::Array(item) => {
                fragment.insert("items".to_string(), item.to_json_schema(false));
            }
            PropertyType::Map(value) => {
                fragment.insert("properties".to_string(), json!({}));
                fragment.insert(
                    "additionalProperties".to_string(),
                    value.to_json_schema(false),
                );
            }
        }

        Value::Object(fragment)
    }
}

/// A named, typed property
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Field name
    pub name: String,
    /// Field type
    pub ty: PropertyType,
    /// Whether the field must be present and non-null
    pub required: bool,
    /// Human-readable description
    pub description: Option<String>,
}

impl Property {
    /// Create an optional property
    pub fn new(name: impl Into<String>, ty: PropertyType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
            description: None,
        }
    }

    /// String property
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, PropertyType::String)
    }

    /// Boolean property
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, PropertyType::Boolean)
    }

    /// Object property
    pub fn object(name: impl Into<String>, schema: Schema) -> Self {
        Self::new(name, PropertyType::Object(schema))
    }

    /// Mark as required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Render as a JSON Schema fragment
    pub fn to_json_schema(&self) -> Value {
        let mut fragment = self.ty.to_json_schema(!self.required);
        if let (Some(description), Value::Object(map)) = (&self.description, &mut fragment) {
            map.insert("description".to_string(), json!(description));
        }
        fragment
    }
}

/// Ordered list of properties describing an object
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    properties: Vec<Property>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property
    #[must_use]
    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    /// Declared properties in order
    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Look up a property by name
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Names of required properties, in declaration order
    pub fn required_names(&self) -> Vec<&str> {
        self.properties
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect()
    }

    /// Top-level property names, in declaration order
    pub fn property_names(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }

    fn properties_json(&self) -> Value {
        let map: Map<String, Value> = self
            .properties
            .iter()
            .map(|p| (p.name.clone(), p.to_json_schema()))
            .collect();
        Value::Object(map)
    }

    /// Render as a top-level JSON Schema document
    pub fn to_json_schema(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("type".to_string(), json!("object"));
        doc.insert("properties".to_string(), self.properties_json());
        let required = self.required_names();
        if !required.is_empty() {
            doc.insert("required".to_string(), json!(required));
        }
        Value::Object(doc)
    }
}
