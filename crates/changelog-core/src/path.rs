//! Dot-path access into nested records
//!
//! Paths such as `header.subject` are split on `.` and walked segment by
//! segment. Reads also step into arrays by numeric index; writes only ever
//! create records.

use serde_json::{Map, Value};

use crate::models::Record;

/// Reads the value at `path`, if every segment resolves
pub fn get_path<'a>(record: &'a Record, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = record.get(segments.next()?)?;

    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Writes `value` at `path`, creating intermediate records on the way
///
/// An intermediate segment holding something other than a record is
/// replaced by a fresh record.
pub fn set_path(record: &mut Record, path: &str, value: Value) {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((leaf, parents)) = segments.split_last() else {
        return;
    };

    let mut current = record;
    for segment in parents {
        let slot = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        current = match slot {
            Value::Object(map) => map,
            _ => unreachable!("slot was just made a record"),
        };
    }

    current.insert(leaf.to_string(), value);
}
