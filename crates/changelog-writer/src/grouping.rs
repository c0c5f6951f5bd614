//! Grouping engine
//!
//! Items are partitioned by a computed key in a single left-to-right pass.
//! Groups come out in the order their key was first seen and items keep
//! their input order; either order only changes when a comparator is given.
//! Sorting is stable, so ties keep discovery order.

use changelog_core::{Commit, GroupKey, Note};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::sorting::Comparator;

/// Commits sharing one value of the group-by field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitGroup {
    pub title: GroupKey,
    pub commits: Vec<Commit>,
}

/// Note texts sharing one note title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteGroup {
    pub title: GroupKey,
    pub notes: Vec<String>,
}

/// Partitions `items` by the key `key_of` computes for each of them
///
/// Keys are equal only when their values are identical; no coercion is
/// applied, so `"1"` and `1` form separate groups. Numbers compare by
/// value, so `1` and `1.0` share one.
pub fn partition<T, F>(items: impl IntoIterator<Item = T>, mut key_of: F) -> Vec<(GroupKey, Vec<T>)>
where
    F: FnMut(&T) -> GroupKey,
{
    let mut groups: Vec<(GroupKey, Vec<T>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let key = key_of(&item);
        let slot = *index
            .entry(canonical(&key))
            .or_insert_with(|| {
                groups.push((key, Vec::new()));
                groups.len() - 1
            });
        groups[slot].1.push(item);
    }

    groups
}

/// Groups commits by the value of `group_by`
///
/// Commits missing the field (or every commit, when `group_by` is `None`)
/// land in the group titled `false`.
pub fn commit_groups(
    group_by: Option<&str>,
    commits: Vec<Commit>,
    groups_sort: Option<&Comparator<CommitGroup>>,
    commits_sort: Option<&Comparator<Commit>>,
) -> Vec<CommitGroup> {
    let buckets = partition(commits, |commit| match group_by {
        Some(field) => GroupKey::from_field(commit.get(field)),
        None => GroupKey::Absent,
    });

    let mut groups: Vec<CommitGroup> = buckets
        .into_iter()
        .map(|(title, mut commits)| {
            if let Some(cmp) = commits_sort {
                commits.sort_by(|a, b| cmp(a, b));
            }
            CommitGroup { title, commits }
        })
        .collect();

    if let Some(cmp) = groups_sort {
        groups.sort_by(|a, b| cmp(a, b));
    }

    log::debug!("Formed {} commit group(s)", groups.len());
    groups
}

/// Groups notes by title, keeping only each note's text
pub fn note_groups(
    notes: Vec<Note>,
    groups_sort: Option<&Comparator<NoteGroup>>,
    notes_sort: Option<&Comparator<String>>,
) -> Vec<NoteGroup> {
    let buckets = partition(notes, |note| GroupKey::from(note.title.as_str()));

    let mut groups: Vec<NoteGroup> = buckets
        .into_iter()
        .map(|(title, notes)| {
            let mut notes: Vec<String> = notes.into_iter().map(|note| note.text).collect();
            if let Some(cmp) = notes_sort {
                notes.sort_by(|a, b| cmp(a, b));
            }
            NoteGroup { title, notes }
        })
        .collect();

    if let Some(cmp) = groups_sort {
        groups.sort_by(|a, b| cmp(a, b));
    }

    groups
}

/// Hashable text for a key; equal values give equal text
fn canonical(key: &GroupKey) -> String {
    match key {
        GroupKey::Present(Value::Number(n)) => match n.as_f64() {
            Some(f) => format!("#{}", f),
            None => format!("={}", n),
        },
        GroupKey::Present(value) => format!("={}", value),
        GroupKey::Absent => "absent".to_string(),
    }
}
