//! Changelog generation
//!
//! Flow for one block of commits:
//!   1. Drop revert pairs (when enabled)
//!   2. Normalize every remaining commit
//!   3. Group commits and notes (block notes come from normalized commits)
//!   4. Layer base context, key context and groups
//!   5. Render the compiled template

use changelog_core::{Commit, CommitInput, Note, Record};

use crate::context::{assemble_context, default_context, merge_context};
use crate::error::Result;
use crate::normalize::normalize;
use crate::options::WriterOptions;
use crate::revert::filter_reverted;
use crate::templates::{compile, CompiledTemplate, DefaultTemplates, TemplateSet};

/// Where the notes of a block come from
pub(crate) enum Notes {
    Given(Vec<Note>),
    /// Collected from the normalized `notes` of the commits that survive
    /// revert filtering
    FromCommits,
}

/// Renders one changelog block
///
/// Compiles `templates` against the built-in defaults on every call; use a
/// [`Writer`] to render repeatedly with one compiled template.
pub fn generate<I>(
    options: &WriterOptions,
    templates: &TemplateSet,
    commits: I,
    notes: Vec<Note>,
    context: &Record,
    key_context: Option<&Record>,
) -> Result<String>
where
    I: IntoIterator,
    I::Item: Into<CommitInput>,
{
    let commits = decode_all(commits)?;
    let template = compile(templates, &DefaultTemplates::builtin())?;
    render_block(&template, options, commits, Notes::Given(notes), context, key_context)
}

/// Compiled template, options and base context for repeated rendering
#[derive(Debug)]
pub struct Writer {
    pub(crate) options: WriterOptions,
    pub(crate) template: CompiledTemplate,
    pub(crate) context: Record,
}

impl Writer {
    /// Creates a writer using the built-in default templates
    ///
    /// The base context is completed with [`default_context`].
    pub fn new(templates: &TemplateSet, context: Record, options: WriterOptions) -> Result<Self> {
        Self::with_defaults(templates, &DefaultTemplates::builtin(), context, options)
    }

    pub fn with_defaults(
        templates: &TemplateSet,
        defaults: &DefaultTemplates,
        context: Record,
        options: WriterOptions,
    ) -> Result<Self> {
        Ok(Self {
            template: compile(templates, defaults)?,
            context: default_context(context),
            options,
        })
    }

    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    pub fn context(&self) -> &Record {
        &self.context
    }

    /// Renders one block of commits and notes
    pub fn render<I>(&self, commits: I, notes: Vec<Note>, key_context: Option<&Record>) -> Result<String>
    where
        I: IntoIterator,
        I::Item: Into<CommitInput>,
    {
        let commits = decode_all(commits)?;
        render_block(
            &self.template,
            &self.options,
            commits,
            Notes::Given(notes),
            &self.context,
            key_context,
        )
    }
}

pub(crate) fn decode_all<I>(commits: I) -> Result<Vec<Commit>>
where
    I: IntoIterator,
    I::Item: Into<CommitInput>,
{
    commits
        .into_iter()
        .map(|input| Ok(Commit::decode(input.into())?))
        .collect()
}

pub(crate) fn render_block(
    template: &CompiledTemplate,
    options: &WriterOptions,
    commits: Vec<Commit>,
    notes: Notes,
    context: &Record,
    key_context: Option<&Record>,
) -> Result<String> {
    let commits = if options.ignore_reverted {
        filter_reverted(commits)
    } else {
        commits
    };

    let commits = commits
        .into_iter()
        .map(|commit| normalize(commit, options.transform.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let notes = match notes {
        Notes::Given(notes) => notes,
        Notes::FromCommits => commits.iter().flat_map(Commit::notes).collect(),
    };

    let extra = assemble_context(commits, notes, options);
    let mut context = merge_context(context, key_context, extra);

    if let Some(finalize) = &options.finalize_context {
        context = finalize(context);
    }

    if log::log_enabled!(log::Level::Debug) {
        log::debug!(
            "Final context:\n{}",
            serde_json::to_string_pretty(&context).unwrap_or_default()
        );
    }

    template.render(&context)
}
