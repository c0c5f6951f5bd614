//! Comparators used to order groups and their items

use changelog_core::Commit;
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::grouping::{CommitGroup, NoteGroup};

/// Three-way comparator over two items
pub type Comparator<T> = Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

/// Declarative sort order: one field name or a list of them
///
/// Fields are compared in turn; the first one that differs decides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SortSpec {
    Field(String),
    Fields(Vec<String>),
}

impl SortSpec {
    pub fn fields(&self) -> &[String] {
        match self {
            SortSpec::Field(field) => std::slice::from_ref(field),
            SortSpec::Fields(fields) => fields,
        }
    }

    /// Builds a comparator reading the spec's fields from each item
    pub fn comparator<T: SortKey + 'static>(&self) -> Comparator<T> {
        let fields = self.fields().to_vec();
        Arc::new(move |a: &T, b: &T| {
            fields
                .iter()
                .map(|field| compare_values(a.sort_key(field).as_ref(), b.sort_key(field).as_ref()))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
    }
}

/// Items that can expose a value for a named sort field
pub trait SortKey {
    fn sort_key(&self, field: &str) -> Option<Value>;
}

impl SortKey for Commit {
    fn sort_key(&self, field: &str) -> Option<Value> {
        self.get_path(field).cloned()
    }
}

impl SortKey for CommitGroup {
    fn sort_key(&self, field: &str) -> Option<Value> {
        match field {
            "title" => Some(self.title.to_value()),
            _ => None,
        }
    }
}

impl SortKey for NoteGroup {
    fn sort_key(&self, field: &str) -> Option<Value> {
        match field {
            "title" => Some(self.title.to_value()),
            _ => None,
        }
    }
}

/// Note items are bare texts: every field resolves to the text itself
impl SortKey for String {
    fn sort_key(&self, _field: &str) -> Option<Value> {
        Some(Value::String(self.clone()))
    }
}

/// Orders two optional JSON values
///
/// Missing and null sort first, then booleans, numbers, strings, arrays and
/// records. Numbers compare numerically, strings lexically; anything else
/// falls back to its JSON text.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(Value::Array(_)) => 4,
            Some(Value::Object(_)) => 5,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(f64::NAN);
            let y = y.as_f64().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(x @ (Value::Array(_) | Value::Object(_))), Some(y)) if rank(Some(x)) == rank(Some(y)) => {
            x.to_string().cmp(&y.to_string())
        }
        _ => rank(a).cmp(&rank(b)),
    }
}
