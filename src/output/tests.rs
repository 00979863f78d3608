//! Tests for output module

use super::*;
use crate::state::State;
use crate::streams::StreamContext;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_schema_message_shape() {
    let msg = Message::schema("languages", json!({"type": "object"}), vec!["id".to_string()]);
    assert!(msg.is_schema());
    assert_eq!(msg.stream(), Some("languages"));
    assert_eq!(
        serde_json::to_value(&msg).unwrap(),
        json!({
            "type": "SCHEMA",
            "stream": "languages",
            "schema": {"type": "object"},
            "key_properties": ["id"]
        })
    );
}

#[test]
fn test_record_message_shape() {
    let msg = Message::record("organizations", json!({"id": "o1"}));
    assert!(msg.is_record());

    let value = serde_json::to_value(&msg).unwrap();
    assert_eq!(value["type"], "RECORD");
    assert_eq!(value["stream"], "organizations");
    assert_eq!(value["record"], json!({"id": "o1"}));
    assert!(value["time_extracted"].is_string());
}

#[test]
fn test_state_message_shape() {
    let mut state = State::new();
    state.mark_completed("i18n_formats", Some(&StreamContext::organization("o1")));

    let msg = Message::state(&state);
    assert!(msg.is_state());
    assert_eq!(msg.stream(), None);
    assert_eq!(
        serde_json::to_value(&msg).unwrap(),
        json!({
            "type": "STATE",
            "value": {
                "bookmarks": {
                    "i18n_formats": {"partitions": [{"context": {"organization_id": "o1"}}]}
                }
            }
        })
    );
}

#[test]
fn test_message_parses_back() {
    let line = r#"{"type":"RECORD","stream":"languages","record":{"id":"l:en"}}"#;
    let msg: Message = serde_json::from_str(line).unwrap();
    assert_eq!(
        msg,
        Message::Record {
            stream: "languages".to_string(),
            record: json!({"id": "l:en"}),
            time_extracted: None,
        }
    );
}

#[test]
fn test_writer_one_message_per_line() {
    let mut writer = MessageWriter::new(Vec::new());
    writer
        .write_all(&[
            Message::schema("languages", json!({}), vec!["id".to_string()]),
            Message::state(&State::new()),
        ])
        .unwrap();
    assert_eq!(writer.written(), 2);

    let out = String::from_utf8(writer.into_inner()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(out.ends_with('\n'));

    let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["type"], "SCHEMA");
    let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second, json!({"type": "STATE", "value": {"bookmarks": {}}}));
}
