//! Tap root
//!
//! Declares the configuration the tap needs and the streams it exposes.

use crate::catalog::{Catalog, CatalogEntry, MetadataEntry};
use crate::config::TapConfig;
use crate::error::{Error, Result};
use crate::streams::{I18nFormats, Languages, Organizations, Stream};
use serde_json::{json, Value};
use std::sync::Arc;

/// Tap name, used in the User-Agent header and `--about`
pub const TAP_NAME: &str = "tap-transifex";

/// Shared, read-only tap state every stream is bound to
#[derive(Debug, Clone)]
pub struct TapHandle {
    inner: Arc<TapInner>,
}

#[derive(Debug)]
struct TapInner {
    config: TapConfig,
    version: String,
}

impl TapHandle {
    /// Create a handle around a config
    pub fn new(config: TapConfig) -> Self {
        Self {
            inner: Arc::new(TapInner {
                config,
                version: crate::VERSION.to_string(),
            }),
        }
    }

    /// Tap configuration
    pub fn config(&self) -> &TapConfig {
        &self.inner.config
    }

    /// Tap name
    pub fn name(&self) -> &'static str {
        TAP_NAME
    }

    /// Tap version
    pub fn version(&self) -> &str {
        &self.inner.version
    }

    /// `<tap-name>/<version>` unless the config overrides it
    pub fn user_agent(&self) -> String {
        self.config()
            .user_agent_override()
            .unwrap_or_else(|| format!("{}/{}", self.name(), self.version()))
    }
}

/// Singer tap for Transifex
#[derive(Debug, Clone)]
pub struct Tap {
    handle: TapHandle,
}

impl Tap {
    /// Create a tap, validating the configuration
    pub fn new(config: TapConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            handle: TapHandle::new(config),
        })
    }

    /// Shared handle
    pub fn handle(&self) -> &TapHandle {
        &self.handle
    }

    /// Tap configuration
    pub fn config(&self) -> &TapConfig {
        self.handle.config()
    }

    /// All streams, in declaration order
    pub fn discover_streams(&self) -> Vec<Box<dyn Stream>> {
        vec![
            Box::new(Languages::new(self.handle.clone())),
            Box::new(Organizations::new(self.handle.clone())),
            Box::new(I18nFormats::new(self.handle.clone())),
        ]
    }

    /// Look up one stream by name
    pub fn stream(&self, name: &str) -> Result<Box<dyn Stream>> {
        self.discover_streams()
            .into_iter()
            .find(|s| s.name() == name)
            .ok_or_else(|| Error::StreamNotFound {
                stream: name.to_string(),
            })
    }

    /// Catalog describing every stream, all selected
    pub fn catalog(&self) -> Catalog {
        let streams = self
            .discover_streams()
            .iter()
            .map(|stream| catalog_entry(stream.as_ref()))
            .collect();
        Catalog { streams }
    }

    /// Tap description for `--about`
    pub fn about() -> Value {
        json!({
            "name": TAP_NAME,
            "description": "Singer tap for Transifex",
            "version": crate::VERSION,
            "capabilities": ["catalog", "discover", "state", "about"],
            "settings": TapConfig::config_jsonschema(),
        })
    }
}

fn catalog_entry(stream: &dyn Stream) -> CatalogEntry {
    let schema = stream.schema();
    let key_properties: Vec<String> = stream
        .primary_keys()
        .iter()
        .map(|k| (*k).to_string())
        .collect();

    let mut metadata = vec![MetadataEntry::stream(
        key_properties.clone(),
        stream.replication_method(),
        stream.replication_key(),
        stream.parent_stream(),
    )];
    metadata.extend(schema.property_names().into_iter().map(|name| {
        let automatic =
            stream.primary_keys().contains(&name) || stream.replication_key() == Some(name);
        MetadataEntry::property(name, automatic)
    }));

    CatalogEntry {
        tap_stream_id: stream.name().to_string(),
        stream: stream.name().to_string(),
        schema: schema.to_json_schema(),
        key_properties,
        replication_method: stream.replication_method(),
        replication_key: stream.replication_key().map(str::to_string),
        metadata,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tap() -> Tap {
        Tap::new(TapConfig::with_token("test-token")).unwrap()
    }

    #[test]
    fn test_missing_token_is_fatal() {
        let err = Tap::new(TapConfig::default()).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == "token"));
    }

    #[test]
    fn test_discover_streams_order() {
        let names: Vec<&str> = tap().discover_streams().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["languages", "organizations", "i18n_formats"]);
    }

    #[test]
    fn test_discover_is_idempotent() {
        let tap = tap();
        let first = serde_json::to_value(tap.catalog()).unwrap();
        let second = serde_json::to_value(tap.catalog()).unwrap();
        assert_eq!(first, second);

        let describe = |streams: Vec<Box<dyn Stream>>| {
            streams
                .iter()
                .map(|s| (s.name(), s.path(), s.primary_keys(), s.schema().clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(
            describe(tap.discover_streams()),
            describe(tap.discover_streams())
        );
    }

    #[test]
    fn test_streams_share_handle() {
        let tap = tap();
        for stream in tap.discover_streams() {
            assert_eq!(stream.tap().config().token, "test-token");
            assert_eq!(stream.tap().user_agent(), tap.handle().user_agent());
        }
    }

    #[test]
    fn test_stream_lookup() {
        let tap = tap();
        assert_eq!(tap.stream("organizations").unwrap().name(), "organizations");
        assert!(matches!(
            tap.stream("projects").unwrap_err(),
            Error::StreamNotFound { .. }
        ));
    }

    #[test]
    fn test_user_agent() {
        let tap = tap();
        assert_eq!(
            tap.handle().user_agent(),
            format!("tap-transifex/{}", crate::VERSION)
        );

        let mut config = TapConfig::with_token("t");
        config.user_agent = Some("custom/1.0".to_string());
        let tap = Tap::new(config).unwrap();
        assert_eq!(tap.handle().user_agent(), "custom/1.0");
    }

    #[test]
    fn test_catalog_entries() {
        let catalog = tap().catalog();
        assert_eq!(catalog.streams.len(), 3);

        let formats = catalog.get("i18n_formats").unwrap();
        assert_eq!(formats.key_properties, vec!["id".to_string()]);
        assert_eq!(formats.replication_key, None);

        let root = formats.stream_metadata().unwrap();
        assert_eq!(
            root.metadata.get("parent-tap-stream-id"),
            Some(&json!("organizations"))
        );
        assert_eq!(root.metadata.get("selected"), Some(&json!(true)));

        let id_meta = formats
            .metadata
            .iter()
            .find(|m| m.breadcrumb == vec!["properties".to_string(), "id".to_string()])
            .unwrap();
        assert_eq!(id_meta.metadata.get("inclusion"), Some(&json!("automatic")));
    }

    #[test]
    fn test_about() {
        let about = Tap::about();
        assert_eq!(about["name"], "tap-transifex");
        assert_eq!(about["settings"]["required"], json!(["token"]));
    }
}
