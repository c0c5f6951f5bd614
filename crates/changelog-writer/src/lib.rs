//! Changelog Writer - Turns parsed commits into a rendered changelog
//!
//! This crate is responsible for:
//! - Normalizing commit records and applying field transforms
//! - Dropping revert pairs
//! - Grouping commits and notes under configurable orderings
//! - Layering the render context and resolving template partials
//! - Rendering one block per release, in parallel
//!
//! ```no_run
//! use changelog_writer::{generate, Record, TemplateSet, WriterOptions};
//! use serde_json::json;
//!
//! let commits = vec![json!({"type": "feat", "header": "feat: add writer"})];
//! let log = generate(
//!     &WriterOptions::default().with_group_by("type"),
//!     &TemplateSet::new("{{#each commitGroups}}{{title}}{{/each}}"),
//!     commits,
//!     Vec::new(),
//!     &Record::new(),
//!     None,
//! )?;
//! assert_eq!(log, "feat");
//! # Ok::<(), changelog_writer::WriterError>(())
//! ```

mod context;
mod error;
mod formatting;
mod generate;
mod grouping;
mod normalize;
mod options;
mod releases;
mod revert;
mod sorting;
mod templates;

pub use changelog_core::{Commit, CommitInput, CoreError, GroupKey, Note, Record, RevertRef};
pub use context::{assemble_context, default_context, merge_context, ExtraContext};
pub use error::{Result, WriterError};
pub use generate::{generate, Writer};
pub use grouping::{commit_groups, note_groups, partition, CommitGroup, NoteGroup};
pub use normalize::{normalize, FieldFn, FieldTransform, RecordFn, Transform};
pub use options::{FinalizeFn, GenerateOn, GenerateOnFn, WriterConfig, WriterOptions};
pub use releases::ReleaseLog;
pub use revert::filter_reverted;
pub use sorting::{compare_values, Comparator, SortKey, SortSpec};
pub use templates::{compile, resolve, CompiledTemplate, DefaultTemplates, ResolvedTemplates, TemplateSet};
