//! Singer catalog types
//!
//! The catalog is printed by `--discover` and read back with `--catalog` to
//! choose which streams to sync.

use crate::error::{Error, Result};
use crate::types::ReplicationMethod;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::path::Path;

/// Catalog of streams
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Stream entries
    pub streams: Vec<CatalogEntry>,
}

/// One stream in the catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stream identifier
    pub tap_stream_id: String,

    /// Stream name
    pub stream: String,

    /// JSON schema of the records
    #[serde(default)]
    pub schema: Value,

    /// Primary key fields
    #[serde(default)]
    pub key_properties: Vec<String>,

    /// Replication method
    #[serde(default)]
    pub replication_method: ReplicationMethod,

    /// Incremental cursor field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_key: Option<String>,

    /// Per-breadcrumb metadata
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

/// Metadata attached to a breadcrumb (`[]` for the stream itself)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Path into the schema
    pub breadcrumb: Vec<String>,

    /// Metadata values
    pub metadata: Map<String, Value>,
}

impl MetadataEntry {
    /// Stream-level metadata, selected by default
    pub fn stream(
        key_properties: Vec<String>,
        replication_method: ReplicationMethod,
        replication_key: Option<&str>,
        parent: Option<&str>,
    ) -> Self {
        let mut metadata = Map::new();
        metadata.insert("inclusion".to_string(), json!("available"));
        metadata.insert("selected".to_string(), json!(true));
        metadata.insert("table-key-properties".to_string(), json!(key_properties));
        metadata.insert(
            "forced-replication-method".to_string(),
            json!(replication_method),
        );
        if let Some(key) = replication_key {
            metadata.insert("valid-replication-keys".to_string(), json!([key]));
        }
        if let Some(parent) = parent {
            metadata.insert("parent-tap-stream-id".to_string(), json!(parent));
        }
        Self {
            breadcrumb: Vec::new(),
            metadata,
        }
    }

    /// Property-level metadata
    pub fn property(name: &str, automatic: bool) -> Self {
        let mut metadata = Map::new();
        let inclusion = if automatic { "automatic" } else { "available" };
        metadata.insert("inclusion".to_string(), json!(inclusion));
        Self {
            breadcrumb: vec!["properties".to_string(), name.to_string()],
            metadata,
        }
    }
}

impl CatalogEntry {
    /// Stream-level metadata entry
    pub fn stream_metadata(&self) -> Option<&MetadataEntry> {
        self.metadata.iter().find(|m| m.breadcrumb.is_empty())
    }

    /// Whether the stream is selected; unannotated streams count as selected
    pub fn is_selected(&self) -> bool {
        self.stream_metadata()
            .and_then(|m| m.metadata.get("selected"))
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }
}

impl Catalog {
    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::config(format!("Invalid catalog: {e}")))
    }

    /// Load a catalog file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read catalog file {}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Entry for a stream
    pub fn get(&self, stream: &str) -> Option<&CatalogEntry> {
        self.streams.iter().find(|s| s.tap_stream_id == stream)
    }

    /// Whether a stream is selected; streams absent from the catalog are not
    pub fn is_selected(&self, stream: &str) -> bool {
        self.get(stream).is_some_and(CatalogEntry::is_selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "streams": [
            {
                "tap_stream_id": "languages",
                "stream": "languages",
                "schema": {"type": "object"},
                "metadata": [
                    {"breadcrumb": [], "metadata": {"selected": false}}
                ]
            },
            {
                "tap_stream_id": "organizations",
                "stream": "organizations",
                "metadata": [
                    {"breadcrumb": [], "metadata": {"selected": true}}
                ]
            },
            {
                "tap_stream_id": "i18n_formats",
                "stream": "i18n_formats"
            }
        ]
    }"#;

    #[test]
    fn test_selection() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        assert!(!catalog.is_selected("languages"));
        assert!(catalog.is_selected("organizations"));
        assert!(catalog.is_selected("i18n_formats"));
        assert!(!catalog.is_selected("projects"));
    }

    #[test]
    fn test_defaults() {
        let catalog = Catalog::from_json(CATALOG).unwrap();
        let formats = catalog.get("i18n_formats").unwrap();
        assert_eq!(formats.replication_method, ReplicationMethod::FullTable);
        assert!(formats.key_properties.is_empty());
        assert!(formats.stream_metadata().is_none());
    }

    #[test]
    fn test_stream_metadata_entry() {
        let entry = MetadataEntry::stream(
            vec!["id".to_string()],
            ReplicationMethod::FullTable,
            None,
            Some("organizations"),
        );
        assert!(entry.breadcrumb.is_empty());
        assert_eq!(entry.metadata["table-key-properties"], json!(["id"]));
        assert_eq!(entry.metadata["forced-replication-method"], json!("FULL_TABLE"));
        assert_eq!(entry.metadata["parent-tap-stream-id"], json!("organizations"));
        assert!(!entry.metadata.contains_key("valid-replication-keys"));
    }

    #[test]
    fn test_invalid_catalog() {
        assert!(Catalog::from_json("{\"streams\": 3}").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, CATALOG).unwrap();
        let catalog = Catalog::from_file(&path).unwrap();
        assert_eq!(catalog.streams.len(), 3);
    }
}
