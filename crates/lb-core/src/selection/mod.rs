//! Selection store domain.
//!
//! One [`SelectionSet`] per onboarding category holds the ids the user has
//! picked, enforcing the category's upper bound at the point of mutation.

mod category;
mod set;

use std::collections::BTreeSet;

pub use category::{SelectionBounds, SelectionCategory, UnknownCategory};
pub use set::{SelectionSet, ToggleOutcome};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("{category} already has the maximum of {max} selections")]
    CapacityExceeded {
        category: SelectionCategory,
        max: usize,
    },
}

/// Trim, drop blanks and dedupe.
///
/// Applied at every boundary where ids enter the client, for all categories.
pub fn normalize_ids<I, S>(ids: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ids.into_iter()
        .filter_map(|id| normalize_one(id.as_ref()))
        .collect()
}

pub(crate) fn normalize_one(id: &str) -> Option<String> {
    let trimmed = id.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
