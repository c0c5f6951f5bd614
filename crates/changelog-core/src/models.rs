//! Core data models for the changelog writer

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::path::get_path;

/// Open field bag backing commit records
pub type Record = Map<String, Value>;

/// Commit record as produced by the upstream commit parser
///
/// Fields are kept in an open record because transforms may reshape any of
/// them (e.g. `header` can become a nested record). The well-known fields are
/// read through typed accessors.
///
/// `raw` holds the snapshot of the record as it was first received. It is set
/// once by normalization and serialized next to the other fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    #[serde(flatten)]
    pub fields: Record,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Record>,
}

/// Commit as handed over by a caller: a decoded value or its JSON text
#[derive(Debug, Clone, PartialEq)]
pub enum CommitInput {
    Value(Value),
    Text(String),
}

/// Reference from a revert commit to the commit it reverts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevertRef {
    #[serde(default)]
    pub hash: Option<String>,

    #[serde(default)]
    pub header: Option<String>,
}

/// Note extracted from a commit (e.g. a breaking-change notice)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Note category; an empty title is a valid category of its own
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub text: String,

    #[serde(flatten)]
    pub extra: Record,
}

impl Commit {
    /// Creates a commit from its fields, without a snapshot
    pub fn new(fields: Record) -> Self {
        Self { fields, raw: None }
    }

    /// Decodes caller input into a commit
    ///
    /// Text (and JSON string values) are parsed once; anything that does not
    /// end up as a record is rejected. A `raw` record already present on the
    /// input is lifted out of the fields so it never nests.
    pub fn decode(input: CommitInput) -> Result<Self, CoreError> {
        let value = match input {
            CommitInput::Value(Value::String(text)) | CommitInput::Text(text) => {
                serde_json::from_str(&text)
                    .map_err(|e| CoreError::MalformedInput(format!("invalid JSON: {}", e)))?
            }
            CommitInput::Value(value) => value,
        };

        let mut fields = match value {
            Value::Object(fields) => fields,
            other => {
                return Err(CoreError::MalformedInput(format!(
                    "expected a commit record, got {}",
                    value_kind(&other)
                )))
            }
        };

        let raw = match fields.remove("raw") {
            Some(Value::Object(raw)) => Some(raw),
            Some(other) => {
                // Not a snapshot, just a field that happens to be called raw
                fields.insert("raw".to_string(), other);
                None
            }
            None => None,
        };

        Ok(Self { fields, raw })
    }

    /// Top-level field lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Dot-path field lookup (e.g. `header.subject`)
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        get_path(&self.fields, path)
    }

    pub fn hash(&self) -> Option<&str> {
        self.get("hash").and_then(Value::as_str)
    }

    pub fn header(&self) -> Option<&str> {
        self.get("header").and_then(Value::as_str)
    }

    pub fn subject(&self) -> Option<&str> {
        self.get("subject").and_then(Value::as_str)
    }

    /// True when the commit carries a non-null `revert` field
    pub fn is_revert(&self) -> bool {
        !matches!(self.get("revert"), None | Some(Value::Null))
    }

    /// The reverted commit reference, when `revert` is a record
    pub fn revert(&self) -> Option<RevertRef> {
        match self.get("revert") {
            Some(value @ Value::Object(_)) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }

    /// Notes attached to the commit; malformed entries are skipped
    pub fn notes(&self) -> Vec<Note> {
        match self.get("notes") {
            Some(Value::Array(notes)) => notes
                .iter()
                .filter_map(|note| serde_json::from_value(note.clone()).ok())
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Converts back into a JSON value, `raw` included
    pub fn into_value(self) -> Value {
        let mut fields = self.fields;
        if let Some(raw) = self.raw {
            fields.insert("raw".to_string(), Value::Object(raw));
        }
        Value::Object(fields)
    }
}

impl Note {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            extra: Record::new(),
        }
    }
}

impl From<Value> for CommitInput {
    fn from(value: Value) -> Self {
        CommitInput::Value(value)
    }
}

impl From<Record> for CommitInput {
    fn from(record: Record) -> Self {
        CommitInput::Value(Value::Object(record))
    }
}

impl From<Commit> for CommitInput {
    fn from(commit: Commit) -> Self {
        CommitInput::Value(commit.into_value())
    }
}

impl From<String> for CommitInput {
    fn from(text: String) -> Self {
        CommitInput::Text(text)
    }
}

impl From<&str> for CommitInput {
    fn from(text: &str) -> Self {
        CommitInput::Text(text.to_string())
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a record",
    }
}
