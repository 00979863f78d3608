//! State types for tracking sync progress
//!
//! These types are serialized to JSON in STATE messages and may be passed
//! back with `--state`.

use crate::error::{Error, Result};
use crate::streams::StreamContext;
use crate::types::JsonObject;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Complete state for the tap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Per-stream bookmarks
    #[serde(default)]
    pub bookmarks: BTreeMap<String, StreamBookmark>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse state from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::state(format!("Failed to parse state JSON: {e}")))
    }

    /// Load state from a file; a missing file yields empty state
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::state(format!("Failed to read state file: {e}")))?;
        Self::from_json(&contents)
    }

    /// Drop a stream's bookmark before a full-table resync
    pub fn reset_stream(&mut self, stream: &str) {
        self.bookmarks.remove(stream);
    }

    /// Record that a stream chain finished
    pub fn mark_completed(&mut self, stream: &str, context: Option<&StreamContext>) {
        let bookmark = self.bookmarks.entry(stream.to_string()).or_default();
        match context {
            Some(context) => bookmark.add_partition(context),
            None => bookmark.completed = true,
        }
    }
}

/// Bookmark for a single stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamBookmark {
    /// Set once a root (context-free) chain has finished
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub completed: bool,

    /// Completed contexts of a child stream
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partitions: Vec<PartitionBookmark>,
}

impl StreamBookmark {
    /// Record a completed context once
    pub fn add_partition(&mut self, context: &StreamContext) {
        let context = context.to_map();
        if !self.partitions.iter().any(|p| p.context == context) {
            self.partitions.push(PartitionBookmark { context });
        }
    }
}

/// Bookmark for one context of a child stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionBookmark {
    /// Context key/values
    pub context: JsonObject,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_state_default() {
        let state = State::new();
        assert!(state.bookmarks.is_empty());
        assert_eq!(serde_json::to_value(&state).unwrap(), json!({"bookmarks": {}}));
    }

    #[test]
    fn test_mark_completed_root_and_partitions() {
        let mut state = State::new();
        state.mark_completed("organizations", None);
        let ctx = StreamContext::organization("o:acme");
        state.mark_completed("i18n_formats", Some(&ctx));
        state.mark_completed("i18n_formats", Some(&ctx));

        assert!(state.bookmarks["organizations"].completed);
        let formats = &state.bookmarks["i18n_formats"];
        assert!(!formats.completed);
        assert_eq!(
            formats.partitions,
            vec![PartitionBookmark {
                context: ctx.to_map()
            }]
        );

        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            json!({
                "bookmarks": {
                    "i18n_formats": {
                        "partitions": [{"context": {"organization_id": "o:acme"}}]
                    },
                    "organizations": {"completed": true}
                }
            })
        );
    }

    #[test]
    fn test_reset_stream() {
        let mut state = State::new();
        state.mark_completed("languages", None);
        state.reset_stream("languages");
        assert!(!state.bookmarks.contains_key("languages"));
    }

    #[test]
    fn test_state_round_trip_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"{"bookmarks": {"i18n_formats": {"partitions": [{"context": {"organization_id": "o:x"}}]}}}"#,
        )
        .unwrap();

        let mut state = State::from_file(&path).unwrap();
        state.mark_completed("i18n_formats", Some(&StreamContext::organization("o:x")));
        assert_eq!(state.bookmarks["i18n_formats"].partitions.len(), 1);
    }

    #[test]
    fn test_missing_state_file_is_empty() {
        let state = State::from_file("/no/such/state.json").unwrap();
        assert_eq!(state, State::new());
    }

    #[test]
    fn test_invalid_state_json() {
        let err = State::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::State { .. }));
    }
}
