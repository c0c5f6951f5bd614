//! Revert filtering
//!
//! A revert commit and the commit it reverts cancel out, so neither belongs
//! in the changelog. Revert references are often shortened hashes, so a
//! commit counts as reverted when its own hash starts with a referenced one.

use changelog_core::Commit;

/// Drops every revert commit along with the commits it reverts
///
/// Revert commits are dropped even when the reverted commit is not part of
/// `commits`. Survivors keep their relative order.
pub fn filter_reverted(commits: Vec<Commit>) -> Vec<Commit> {
    let reverted: Vec<String> = commits
        .iter()
        .filter_map(|commit| commit.revert()?.hash)
        // an empty reference would be a prefix of every hash
        .filter(|hash| !hash.is_empty())
        .collect();

    let before = commits.len();
    let kept: Vec<Commit> = commits
        .into_iter()
        .filter(|commit| !commit.is_revert() && !is_reverted(commit, &reverted))
        .collect();

    log::debug!(
        "Revert filter dropped {} of {} commit(s)",
        before - kept.len(),
        before
    );
    kept
}

/// True when the commit's hash has one of the reverted hashes as a prefix
fn is_reverted(commit: &Commit, reverted: &[String]) -> bool {
    match commit.hash() {
        Some(hash) => reverted.iter().any(|prefix| hash.starts_with(prefix.as_str())),
        None => false,
    }
}
