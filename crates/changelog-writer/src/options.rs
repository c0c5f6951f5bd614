//! Writer options and their declarative configuration

use changelog_core::{Commit, Record};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::grouping::{CommitGroup, NoteGroup};
use crate::normalize::Transform;
use crate::sorting::{Comparator, SortSpec};

/// Decides whether a commit marks a release
pub type GenerateOnFn = Arc<dyn Fn(&Commit) -> bool + Send + Sync>;

/// Last-chance hook over the merged render context
pub type FinalizeFn = Arc<dyn Fn(Record) -> Record + Send + Sync>;

/// How release boundaries are detected in a commit stream
#[derive(Clone)]
pub enum GenerateOn {
    /// The named field holds a valid semver version
    SemverField(String),

    /// Caller-supplied predicate
    Custom(GenerateOnFn),

    /// Never split; the whole stream is one block
    Never,
}

/// Runtime options for the writer
#[derive(Clone)]
pub struct WriterOptions {
    /// Commit field to group commits by
    pub group_by: Option<String>,

    /// Drop revert commits together with the commits they revert
    pub ignore_reverted: bool,

    pub commit_groups_sort: Option<Comparator<CommitGroup>>,
    pub commits_sort: Option<Comparator<Commit>>,
    pub note_groups_sort: Option<Comparator<NoteGroup>>,
    pub notes_sort: Option<Comparator<String>>,

    /// Applied to every commit during normalization
    pub transform: Option<Transform>,

    pub generate_on: GenerateOn,

    /// Commits arrive oldest first
    pub reverse: bool,

    /// Render the commits left after the last release boundary
    pub do_flush: bool,

    pub finalize_context: Option<FinalizeFn>,
}

/// Declarative subset of [`WriterOptions`], as found in JSON configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WriterConfig {
    pub group_by: Option<String>,
    pub ignore_reverted: bool,
    pub commit_groups_sort: Option<SortSpec>,
    pub commits_sort: Option<SortSpec>,
    pub note_groups_sort: Option<SortSpec>,
    pub notes_sort: Option<SortSpec>,

    /// Field whose semver value marks a release; `null` never splits
    pub generate_on: Option<String>,
    pub reverse: bool,
    pub do_flush: bool,
}

impl GenerateOn {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Commit) -> bool + Send + Sync + 'static,
    {
        GenerateOn::Custom(Arc::new(f))
    }

    /// True when `commit` marks a release
    pub fn matches(&self, commit: &Commit) -> bool {
        match self {
            GenerateOn::SemverField(field) => commit
                .get_path(field)
                .and_then(Value::as_str)
                .is_some_and(is_valid_version),
            GenerateOn::Custom(f) => f(commit),
            GenerateOn::Never => false,
        }
    }
}

impl Default for GenerateOn {
    fn default() -> Self {
        GenerateOn::SemverField("version".to_string())
    }
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            group_by: None,
            ignore_reverted: false,
            commit_groups_sort: None,
            commits_sort: None,
            note_groups_sort: None,
            notes_sort: None,
            transform: None,
            generate_on: GenerateOn::default(),
            reverse: false,
            do_flush: true,
            finalize_context: None,
        }
    }
}

impl WriterOptions {
    pub fn with_group_by(mut self, field: impl Into<String>) -> Self {
        self.group_by = Some(field.into());
        self
    }

    pub fn with_ignore_reverted(mut self, ignore: bool) -> Self {
        self.ignore_reverted = ignore;
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    pub fn with_finalize_context<F>(mut self, f: F) -> Self
    where
        F: Fn(Record) -> Record + Send + Sync + 'static,
    {
        self.finalize_context = Some(Arc::new(f));
        self
    }
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            group_by: None,
            ignore_reverted: false,
            commit_groups_sort: None,
            commits_sort: None,
            note_groups_sort: None,
            notes_sort: None,
            generate_on: Some("version".to_string()),
            reverse: false,
            do_flush: true,
        }
    }
}

impl WriterConfig {
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl From<WriterConfig> for WriterOptions {
    fn from(config: WriterConfig) -> Self {
        Self {
            group_by: config.group_by,
            ignore_reverted: config.ignore_reverted,
            commit_groups_sort: config.commit_groups_sort.map(|s| s.comparator()),
            commits_sort: config.commits_sort.map(|s| s.comparator()),
            note_groups_sort: config.note_groups_sort.map(|s| s.comparator()),
            notes_sort: config.notes_sort.map(|s| s.comparator()),
            transform: None,
            generate_on: match config.generate_on {
                Some(field) => GenerateOn::SemverField(field),
                None => GenerateOn::Never,
            },
            reverse: config.reverse,
            do_flush: config.do_flush,
            finalize_context: None,
        }
    }
}

impl fmt::Debug for WriterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterOptions")
            .field("group_by", &self.group_by)
            .field("ignore_reverted", &self.ignore_reverted)
            .field("commit_groups_sort", &self.commit_groups_sort.is_some())
            .field("commits_sort", &self.commits_sort.is_some())
            .field("note_groups_sort", &self.note_groups_sort.is_some())
            .field("notes_sort", &self.notes_sort.is_some())
            .field("transform", &self.transform)
            .field("reverse", &self.reverse)
            .field("do_flush", &self.do_flush)
            .finish_non_exhaustive()
    }
}

/// Accepts `1.2.3` as well as a leading `v` (`v1.2.3`)
pub(crate) fn is_valid_version(text: &str) -> bool {
    let text = text.trim();
    let text = text.strip_prefix('v').unwrap_or(text);
    semver::Version::parse(text).is_ok()
}
