//! Tests for commit and note grouping and context assembly

use changelog_writer::{
    assemble_context, commit_groups, note_groups, Comparator, Commit, CommitGroup, GroupKey, Note,
    NoteGroup, WriterOptions,
};
use serde_json::{json, Value};
use std::sync::Arc;

// ── fixtures ─────────────────────────────────────────────────────────────────

fn commit(value: Value) -> Commit {
    Commit::decode(value.into()).unwrap()
}

fn commits() -> Vec<Commit> {
    vec![
        commit(json!({"groupBy": "A", "content": "this is A"})),
        commit(json!({"groupBy": "A", "content": "this is another A"})),
        commit(json!({"groupBy": "Big B", "content": "this is B and its a bit longer"})),
    ]
}

fn notes() -> Vec<Note> {
    vec![
        Note::new("A title", "this is A and its a bit longer"),
        Note::new("B+", "this is B"),
        Note::new("C", "this is C"),
        Note::new("A title", "this is another A"),
        Note::new("B+", "this is another B"),
    ]
}

fn content(group: &CommitGroup) -> Vec<&str> {
    group
        .commits
        .iter()
        .filter_map(|c| c.get("content").and_then(Value::as_str))
        .collect()
}

fn titles<T>(groups: &[T], title: impl Fn(&T) -> &GroupKey) -> Vec<Value> {
    groups.iter().map(|g| title(g).to_value()).collect()
}

// ── commit groups ────────────────────────────────────────────────────────────

#[test]
fn test_group_without_sorting() {
    let groups = commit_groups(Some("groupBy"), commits(), None, None);

    assert_eq!(titles(&groups, |g| &g.title), [json!("A"), json!("Big B")]);
    assert_eq!(content(&groups[0]), ["this is A", "this is another A"]);
    assert_eq!(content(&groups[1]), ["this is B and its a bit longer"]);
}

#[test]
fn test_group_with_missing_field() {
    let commits = vec![
        commit(json!({"content": "this is A"})),
        commit(json!({"content": "this is another A"})),
        commit(json!({"groupBy": "Big B", "content": "this is B and its a bit longer"})),
    ];
    let groups = commit_groups(Some("groupBy"), commits, None, None);

    assert_eq!(groups[0].title, GroupKey::Absent);
    assert_eq!(content(&groups[0]), ["this is A", "this is another A"]);
    assert_eq!(groups[1].title, GroupKey::from("Big B"));
}

#[test]
fn test_group_serializes_like_templates_expect() {
    let groups = commit_groups(Some("groupBy"), vec![commit(json!({"content": "x"}))], None, None);
    assert_eq!(
        serde_json::to_value(&groups).unwrap(),
        json!([{"title": false, "commits": [{"content": "x"}]}])
    );
}

#[test]
fn test_group_and_sort_groups() {
    let by_title_length_desc: Comparator<CommitGroup> = Arc::new(|a: &CommitGroup, b: &CommitGroup| {
        let len = |g: &CommitGroup| g.title.as_str().map_or(0, str::len);
        len(b).cmp(&len(a))
    });
    let groups = commit_groups(Some("groupBy"), commits(), Some(&by_title_length_desc), None);

    assert_eq!(titles(&groups, |g| &g.title), [json!("Big B"), json!("A")]);
    assert_eq!(content(&groups[1]), ["this is A", "this is another A"]);
}

#[test]
fn test_group_and_sort_commits() {
    let by_content_length_desc: Comparator<Commit> = Arc::new(|a: &Commit, b: &Commit| {
        let len = |c: &Commit| c.get("content").and_then(Value::as_str).map_or(0, str::len);
        len(b).cmp(&len(a))
    });
    let groups = commit_groups(Some("groupBy"), commits(), None, Some(&by_content_length_desc));

    assert_eq!(titles(&groups, |g| &g.title), [json!("A"), json!("Big B")]);
    assert_eq!(content(&groups[0]), ["this is another A", "this is A"]);
}

#[test]
fn test_empty_and_absent_keys_stay_apart() {
    let commits = vec![
        commit(json!({"type": "", "content": "empty"})),
        commit(json!({"content": "absent"})),
        commit(json!({"type": null, "content": "null"})),
    ];
    let groups = commit_groups(Some("type"), commits, None, None);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].title, GroupKey::from(""));
    assert_eq!(groups[1].title, GroupKey::Absent);
    assert_eq!(content(&groups[1]), ["absent", "null"]);
}

// ── note groups ──────────────────────────────────────────────────────────────

#[test]
fn test_note_group() {
    let groups = note_groups(notes(), None, None);

    assert_eq!(
        serde_json::to_value(&groups).unwrap(),
        json!([
            {"title": "A title", "notes": ["this is A and its a bit longer", "this is another A"]},
            {"title": "B+", "notes": ["this is B", "this is another B"]},
            {"title": "C", "notes": ["this is C"]}
        ])
    );
}

#[test]
fn test_note_group_and_sort_groups() {
    let by_title_length: Comparator<NoteGroup> = Arc::new(|a: &NoteGroup, b: &NoteGroup| {
        let len = |g: &NoteGroup| g.title.as_str().map_or(0, str::len);
        len(a).cmp(&len(b))
    });
    let groups = note_groups(notes(), Some(&by_title_length), None);

    assert_eq!(
        titles(&groups, |g| &g.title),
        [json!("C"), json!("B+"), json!("A title")]
    );
    assert_eq!(groups[1].notes, ["this is B", "this is another B"]);
}

#[test]
fn test_note_group_and_sort_notes() {
    let by_length_desc: Comparator<String> = Arc::new(|a: &String, b: &String| b.len().cmp(&a.len()));
    let groups = note_groups(notes(), None, Some(&by_length_desc));

    assert_eq!(groups[0].notes, ["this is A and its a bit longer", "this is another A"]);
    assert_eq!(groups[1].notes, ["this is another B", "this is B"]);
    assert_eq!(groups[2].notes, ["this is C"]);
}

#[test]
fn test_note_group_with_empty_title() {
    let notes = vec![
        Note::new("", "this is A and its a bit longer"),
        Note::new("B+", "this is B"),
        Note::new("", "this is another A"),
        Note::new("B+", "this is another B"),
    ];
    let groups = note_groups(notes, None, None);

    assert_eq!(groups[0].title, GroupKey::from(""));
    assert_eq!(groups[0].notes, ["this is A and its a bit longer", "this is another A"]);
    assert_eq!(groups[1].title, GroupKey::from("B+"));
}

// ── context assembly ─────────────────────────────────────────────────────────

fn context_commits() -> Vec<Commit> {
    vec![
        commit(json!({"content": "this is A"})),
        commit(json!({"content": "this is another A"})),
        commit(json!({"groupBy": "Big B", "content": "this is B and its a bit longer"})),
    ]
}

fn context_notes() -> Vec<Note> {
    vec![
        Note::new("A", "this is A and its a bit longer"),
        Note::new("B", "this is B"),
        Note::new("A", "this is another A"),
        Note::new("B", "this is another B"),
    ]
}

fn expected_note_groups() -> Value {
    json!([
        {"title": "A", "notes": ["this is A and its a bit longer", "this is another A"]},
        {"title": "B", "notes": ["this is B", "this is another B"]}
    ])
}

#[test]
fn test_context_without_group_by() {
    let extra = assemble_context(context_commits(), context_notes(), &WriterOptions::default());

    assert_eq!(
        serde_json::to_value(&extra).unwrap(),
        json!({
            "commitGroups": [{
                "title": false,
                "commits": [
                    {"content": "this is A"},
                    {"content": "this is another A"},
                    {"content": "this is B and its a bit longer", "groupBy": "Big B"}
                ]
            }],
            "noteGroups": expected_note_groups()
        })
    );
}

#[test]
fn test_context_with_group_by_found() {
    let options = WriterOptions::default().with_group_by("groupBy");
    let extra = assemble_context(context_commits(), context_notes(), &options);

    assert_eq!(
        serde_json::to_value(&extra).unwrap(),
        json!({
            "commitGroups": [{
                "title": false,
                "commits": [{"content": "this is A"}, {"content": "this is another A"}]
            }, {
                "title": "Big B",
                "commits": [{"content": "this is B and its a bit longer", "groupBy": "Big B"}]
            }],
            "noteGroups": expected_note_groups()
        })
    );
}

#[test]
fn test_context_with_group_by_not_found() {
    let options = WriterOptions::default().with_group_by("what?");
    let extra = assemble_context(context_commits(), context_notes(), &options);

    assert_eq!(extra.commit_groups.len(), 1);
    assert_eq!(extra.commit_groups[0].title, GroupKey::Absent);
    assert_eq!(content(&extra.commit_groups[0]).len(), 3);
    assert_eq!(serde_json::to_value(&extra.note_groups).unwrap(), expected_note_groups());
}
