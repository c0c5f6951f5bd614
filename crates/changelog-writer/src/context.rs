//! Render context assembly
//!
//! The final context is layered from the caller's base context, an optional
//! key context (per-release metadata) and the computed groups. Later layers
//! replace earlier ones field by field at the top level only.

use changelog_core::{Commit, Note, Record};
use serde::Serialize;
use serde_json::Value;

use crate::formatting::today;
use crate::grouping::{commit_groups, note_groups, CommitGroup, NoteGroup};
use crate::options::{is_valid_version, WriterOptions};

/// Context computed from the commits and notes of one block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraContext {
    pub commit_groups: Vec<CommitGroup>,
    pub note_groups: Vec<NoteGroup>,
}

/// Groups commits by `options.group_by` and notes by title
pub fn assemble_context(commits: Vec<Commit>, notes: Vec<Note>, options: &WriterOptions) -> ExtraContext {
    ExtraContext {
        commit_groups: commit_groups(
            options.group_by.as_deref(),
            commits,
            options.commit_groups_sort.as_ref(),
            options.commits_sort.as_ref(),
        ),
        note_groups: note_groups(
            notes,
            options.note_groups_sort.as_ref(),
            options.notes_sort.as_ref(),
        ),
    }
}

/// Layers `context`, `key_context` and the computed groups
///
/// `commitGroups` and `noteGroups` always come from `extra`. A key context
/// carrying `committerDate` provides the `date`, and a semver `version`
/// with a non-zero patch component marks the block as a patch release.
pub fn merge_context(context: &Record, key_context: Option<&Record>, extra: ExtraContext) -> Record {
    let mut merged = context.clone();

    if let Some(key_context) = key_context {
        for (key, value) in key_context {
            merged.insert(key.clone(), value.clone());
        }
        if let Some(date) = key_context.get("committerDate").filter(|date| !date.is_null()) {
            merged.insert("date".to_string(), date.clone());
        }
    }

    let version_patch = merged
        .get("version")
        .and_then(Value::as_str)
        .filter(|version| is_valid_version(version))
        .and_then(|version| semver::Version::parse(version.trim().trim_start_matches('v')).ok())
        .map(|version| version.patch);
    if let Some(patch) = version_patch {
        let already = merged.get("isPatch").is_some_and(is_truthy);
        merged.insert("isPatch".to_string(), Value::Bool(already || patch != 0));
    }

    merged.insert("commitGroups".to_string(), to_value(&extra.commit_groups));
    merged.insert("noteGroups".to_string(), to_value(&extra.note_groups));
    merged
}

/// Fills in the context defaults templates rely on
///
/// `commit` and `issue` name the URL path segments for commits and issues,
/// `date` defaults to today, and `linkReferences` turns on when a repository
/// is known and the caller did not decide otherwise.
pub fn default_context(mut context: Record) -> Record {
    context
        .entry("commit")
        .or_insert_with(|| Value::String("commits".to_string()));
    context
        .entry("issue")
        .or_insert_with(|| Value::String("issues".to_string()));
    context
        .entry("date")
        .or_insert_with(|| Value::String(today()));

    if !matches!(context.get("linkReferences"), Some(Value::Bool(_))) {
        let has_repository = ["repository", "repoUrl"]
            .iter()
            .any(|key| context.get(*key).is_some_and(is_truthy));
        if has_repository {
            context.insert("linkReferences".to_string(), Value::Bool(true));
        }
    }

    context
}

/// Template truthiness: `null`, `false`, `0`, `""` and `[]` are falsy
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

fn to_value<T: Serialize>(groups: &T) -> Value {
    // Groups hold only JSON values, keys and strings
    serde_json::to_value(groups).unwrap_or(Value::Null)
}
