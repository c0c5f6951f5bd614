//! Changelog Core - Shared data models for the changelog writer
//!
//! This crate defines the records flowing through the writer: open commit
//! records with typed accessors for the well-known fields, notes, and the
//! keys commit and note groups are formed under.

mod error;
mod group_key;
mod models;
mod path;

pub use error::CoreError;
pub use group_key::GroupKey;
pub use models::{Commit, CommitInput, Note, Record, RevertRef};
pub use path::{get_path, set_path};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_commit_accessors() {
        let commit = Commit::decode(
            json!({
                "hash": "56185b7",
                "header": "feat: new module",
                "revert": null
            })
            .into(),
        )
        .unwrap();
        assert_eq!(commit.hash(), Some("56185b7"));
        assert_eq!(commit.header(), Some("feat: new module"));
        assert!(!commit.is_revert());
        assert_eq!(commit.revert(), None);
    }

    #[test]
    fn test_absent_key_serializes_as_false() {
        assert_eq!(serde_json::to_value(GroupKey::Absent).unwrap(), json!(false));
        assert_eq!(serde_json::to_value(GroupKey::from("")).unwrap(), json!(""));
    }
}
