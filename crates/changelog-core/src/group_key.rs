//! Group keys for commit and note groups

use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Key a group was formed under
///
/// `Absent` means the grouping field was missing (or null) on the item. It is
/// kept apart from present-but-falsy values such as `""` or `0`, and only
/// becomes the `false` sentinel when serialized for templates.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupKey {
    Present(Value),
    Absent,
}

impl GroupKey {
    /// Builds the key from an optional field value
    pub fn from_field(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => GroupKey::Absent,
            Some(value) => GroupKey::Present(value.clone()),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, GroupKey::Absent)
    }

    /// The key as seen by templates: `false` when absent
    pub fn to_value(&self) -> Value {
        match self {
            GroupKey::Present(value) => value.clone(),
            GroupKey::Absent => Value::Bool(false),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            GroupKey::Present(value) => value.as_str(),
            GroupKey::Absent => None,
        }
    }
}

impl From<&str> for GroupKey {
    fn from(title: &str) -> Self {
        GroupKey::Present(Value::String(title.to_string()))
    }
}

impl Serialize for GroupKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            GroupKey::Present(value) => value.serialize(serializer),
            GroupKey::Absent => serializer.serialize_bool(false),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Present(Value::String(s)) => write!(f, "{:?}", s),
            GroupKey::Present(value) => write!(f, "{}", value),
            GroupKey::Absent => write!(f, "<absent>"),
        }
    }
}
