//! Splitting a commit stream into release blocks
//!
//! A commit that marks a release (see [`GenerateOn`]) is the key commit of
//! its block and provides the block's key context. With the default,
//! newest-first order a key commit opens its block; with `reverse` (oldest
//! first) it closes it. Blocks are independent and render in parallel.
//!
//! [`GenerateOn`]: crate::options::GenerateOn

use changelog_core::{Commit, CommitInput};
use rayon::prelude::*;
use std::mem;

use crate::error::Result;
use crate::generate::{decode_all, render_block, Notes, Writer};
use crate::normalize::normalize;
use crate::options::WriterOptions;

/// Rendered block together with the commit that marked its release
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseLog {
    pub log: String,

    /// `None` for commits not yet part of any release
    pub key_commit: Option<Commit>,
}

/// Commits of one release before rendering
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Block {
    pub commits: Vec<Commit>,
    pub key: Option<Commit>,
}

impl Writer {
    /// Renders one block per release found in `commits`
    ///
    /// Notes are taken from each commit's `notes` field. Output follows
    /// stream order.
    pub fn write_releases<I>(&self, commits: I) -> Result<Vec<ReleaseLog>>
    where
        I: IntoIterator,
        I::Item: Into<CommitInput>,
    {
        let blocks = split_releases(decode_all(commits)?, &self.options);
        log::info!("Rendering {} release block(s)", blocks.len());

        blocks
            .into_par_iter()
            .map(|block| self.render_release(block))
            .collect()
    }

    fn render_release(&self, block: Block) -> Result<ReleaseLog> {
        let key_context = match &block.key {
            Some(key) => Some(normalize(key.clone(), self.options.transform.as_ref())?.fields),
            None => None,
        };

        let log = render_block(
            &self.template,
            &self.options,
            block.commits,
            Notes::FromCommits,
            &self.context,
            key_context.as_ref(),
        )?;

        Ok(ReleaseLog {
            log,
            key_commit: block.key,
        })
    }
}

/// Cuts `commits` into release blocks
///
/// Commits left after the last boundary form a trailing block. In
/// newest-first order it is the oldest release and always kept, and a
/// stream without releases still yields one block. In oldest-first order
/// the trailing commits are unreleased and kept only when `do_flush` is set.
pub(crate) fn split_releases(commits: Vec<Commit>, options: &WriterOptions) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    if options.reverse {
        for commit in commits {
            let is_key = options.generate_on.matches(&commit);
            let key = is_key.then(|| commit.clone());
            current.push(commit);
            if key.is_some() {
                blocks.push(Block {
                    commits: mem::take(&mut current),
                    key,
                });
            }
        }

        if options.do_flush && !current.is_empty() {
            blocks.push(Block {
                commits: current,
                key: None,
            });
        }
    } else {
        let mut key: Option<Commit> = None;

        for commit in commits {
            if options.generate_on.matches(&commit) {
                // Commits newer than the first release only form a block if there are any
                if !current.is_empty() || key.is_some() {
                    blocks.push(Block {
                        commits: mem::take(&mut current),
                        key: key.take(),
                    });
                }
                key = Some(commit.clone());
            }
            current.push(commit);
        }

        // A trailing block with a key commit is a complete release
        let has_trailing = !current.is_empty() || key.is_some();
        if has_trailing && (options.do_flush || key.is_some() || blocks.is_empty()) {
            blocks.push(Block { commits: current, key });
        }
    }

    blocks
}
