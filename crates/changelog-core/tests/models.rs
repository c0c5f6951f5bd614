//! Tests for core data models

use changelog_core::{Commit, CommitInput, CoreError, GroupKey, Note};
use serde_json::{json, Value};

// ── fixtures ─────────────────────────────────────────────────────────────────

fn revert_commit() -> Value {
    json!({
        "header": "revert: feat(): amazing new module\n",
        "revert": {
            "header": "feat(): amazing new module",
            "hash": "56185b7356766d2b30cfa2406b257080272e0b7a"
        },
        "hash": "789d898b5f8422d7f65cc25135af2c1a95a125ac\n",
        "notes": [
            {"title": "BREAKING CHANGE", "text": "Not backward compatible."},
            "not a note"
        ]
    })
}

// ── decode ───────────────────────────────────────────────────────────────────

#[test]
fn test_decode_record() {
    let commit = Commit::decode(revert_commit().into()).unwrap();
    assert_eq!(commit.hash(), Some("789d898b5f8422d7f65cc25135af2c1a95a125ac\n"));
    assert!(commit.raw.is_none());
}

#[test]
fn test_decode_json_text() {
    let text = serde_json::to_string(&revert_commit()).unwrap();
    let commit = Commit::decode(CommitInput::from(text)).unwrap();
    assert_eq!(commit.header(), Some("revert: feat(): amazing new module\n"));
}

#[test]
fn test_decode_json_string_value() {
    let text = serde_json::to_string(&json!({"hash": "abc"})).unwrap();
    let commit = Commit::decode(Value::String(text).into()).unwrap();
    assert_eq!(commit.hash(), Some("abc"));
}

#[test]
fn test_decode_rejects_invalid_json() {
    let err = Commit::decode("{not json".into()).unwrap_err();
    assert!(matches!(err, CoreError::MalformedInput(_)));
}

#[test]
fn test_decode_rejects_non_record() {
    let err = Commit::decode("[1, 2, 3]".into()).unwrap_err();
    assert!(err.to_string().contains("an array"));
}

#[test]
fn test_decode_lifts_existing_raw() {
    let commit = Commit::decode(
        json!({"hash": "abc", "raw": {"hash": "abcdef"}}).into(),
    )
    .unwrap();
    assert!(commit.get("raw").is_none());
    assert_eq!(commit.raw.unwrap().get("hash"), Some(&json!("abcdef")));
}

#[test]
fn test_decode_keeps_non_record_raw_as_field() {
    let commit = Commit::decode(json!({"raw": "plain"}).into()).unwrap();
    assert_eq!(commit.get("raw"), Some(&json!("plain")));
    assert!(commit.raw.is_none());
}

// ── accessors ────────────────────────────────────────────────────────────────

#[test]
fn test_revert_reference() {
    let commit = Commit::decode(revert_commit().into()).unwrap();
    assert!(commit.is_revert());
    let revert = commit.revert().unwrap();
    assert_eq!(
        revert.hash.as_deref(),
        Some("56185b7356766d2b30cfa2406b257080272e0b7a")
    );
}

#[test]
fn test_notes_skip_malformed_entries() {
    let commit = Commit::decode(revert_commit().into()).unwrap();
    assert_eq!(
        commit.notes(),
        vec![Note::new("BREAKING CHANGE", "Not backward compatible.")]
    );
}

#[test]
fn test_dot_path_lookup() {
    let commit = Commit::decode(json!({"header": {"subject": "s"}}).into()).unwrap();
    assert_eq!(commit.get_path("header.subject"), Some(&json!("s")));
    // header is a record here, not text
    assert_eq!(commit.header(), None);
}

// ── serialization ────────────────────────────────────────────────────────────

#[test]
fn test_commit_serializes_flat_with_raw() {
    let mut commit = Commit::decode(json!({"hash": "abc"}).into()).unwrap();
    commit.raw = Some(commit.fields.clone());
    assert_eq!(
        serde_json::to_value(&commit).unwrap(),
        json!({"hash": "abc", "raw": {"hash": "abc"}})
    );
}

#[test]
fn test_group_key_from_field() {
    assert_eq!(GroupKey::from_field(None), GroupKey::Absent);
    assert_eq!(GroupKey::from_field(Some(&Value::Null)), GroupKey::Absent);
    assert_eq!(GroupKey::from_field(Some(&json!(""))), GroupKey::from(""));
    assert_ne!(GroupKey::from(""), GroupKey::Absent);
    assert_eq!(GroupKey::Absent.to_string(), "<absent>");
}
