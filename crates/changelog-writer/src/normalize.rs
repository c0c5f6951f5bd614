//! Commit normalization
//!
//! Turns caller input (a record or its JSON text) into a [`Commit`] carrying
//! a snapshot of what was received, then applies the configured transform.

use changelog_core::{get_path, set_path, Commit, CommitInput, Record};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::{Result, WriterError};
use crate::formatting::{format_commit_date, format_unix_timestamp};

/// Whole-record transform function
pub type RecordFn = Arc<dyn Fn(Record) -> anyhow::Result<Record> + Send + Sync>;

/// Per-field transform function; receives only the field's current value
pub type FieldFn = Arc<dyn Fn(Value) -> anyhow::Result<Value> + Send + Sync>;

/// Transform applied to every commit after its snapshot is taken
#[derive(Clone)]
pub enum Transform {
    /// Receives the record and returns its replacement
    Record(RecordFn),

    /// Rewrites individual fields, addressed by dot paths, in order
    Fields(Vec<(String, FieldTransform)>),
}

/// Rewrite of a single field
#[derive(Clone)]
pub enum FieldTransform {
    /// Literal replacement value
    Value(Value),

    /// Function of the current value (`Value::Null` when missing)
    Map(FieldFn),
}

impl Transform {
    pub fn record<F>(f: F) -> Self
    where
        F: Fn(Record) -> anyhow::Result<Record> + Send + Sync + 'static,
    {
        Transform::Record(Arc::new(f))
    }

    pub fn fields<I, P>(fields: I) -> Self
    where
        I: IntoIterator<Item = (P, FieldTransform)>,
        P: Into<String>,
    {
        Transform::Fields(fields.into_iter().map(|(path, f)| (path.into(), f)).collect())
    }

    /// Transform used for conventional changelogs
    ///
    /// Shortens `hash` to 7 characters and `header` to 100, and rewrites
    /// `committerDate` as `YYYY-MM-DD`. Fields that are missing, or of an
    /// unexpected shape, are left alone.
    pub fn conventional() -> Self {
        Transform::record(|mut record| {
            if let Some(Value::String(hash)) = record.get_mut("hash") {
                *hash = hash.chars().take(7).collect();
            }
            if let Some(Value::String(header)) = record.get_mut("header") {
                *header = header.chars().take(100).collect();
            }
            let date = match record.get("committerDate") {
                Some(Value::String(text)) => format_commit_date(text),
                Some(Value::Number(n)) => n.as_i64().and_then(format_unix_timestamp),
                _ => None,
            };
            if let Some(date) = date {
                record.insert("committerDate".to_string(), Value::String(date));
            }
            Ok(record)
        })
    }

    /// Applies the transform to a record
    ///
    /// Errors from transform functions are returned untouched.
    pub fn apply(&self, record: Record) -> Result<Record> {
        match self {
            Transform::Record(f) => f(record).map_err(WriterError::Transform),
            Transform::Fields(fields) => {
                let mut record = record;
                for (path, field) in fields {
                    let value = match field {
                        FieldTransform::Value(value) => value.clone(),
                        FieldTransform::Map(f) => {
                            let current = get_path(&record, path).cloned().unwrap_or(Value::Null);
                            f(current).map_err(WriterError::Transform)?
                        }
                    };
                    set_path(&mut record, path, value);
                }
                Ok(record)
            }
        }
    }
}

impl FieldTransform {
    pub fn value(value: impl Into<Value>) -> Self {
        FieldTransform::Value(value.into())
    }

    pub fn map<F>(f: F) -> Self
    where
        F: Fn(Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        FieldTransform::Map(Arc::new(f))
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Record(_) => f.write_str("Transform::Record(..)"),
            Transform::Fields(fields) => f
                .debug_list()
                .entries(fields.iter().map(|(path, _)| path))
                .finish(),
        }
    }
}

/// Normalizes one commit
///
/// Decodes text input, snapshots the decoded record into `raw` and applies
/// `transform` to everything but `raw`. A commit that already carries a
/// snapshot keeps it, so normalizing twice never nests `raw`.
pub fn normalize(input: impl Into<CommitInput>, transform: Option<&Transform>) -> Result<Commit> {
    let mut commit = Commit::decode(input.into())?;

    if commit.raw.is_none() {
        commit.raw = Some(commit.fields.clone());
    }

    if let Some(transform) = transform {
        commit.fields = transform.apply(commit.fields)?;
    }

    Ok(commit)
}
