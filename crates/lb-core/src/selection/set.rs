use std::collections::BTreeSet;

use serde::Serialize;

use super::{normalize_ids, normalize_one, SelectionBounds, SelectionCategory, SelectionError};

/// Result of a successful [`SelectionSet::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// Blank id, nothing changed.
    Ignored,
}

/// The current user's selection for one onboarding category.
///
/// Cardinality is only enforced at the point of adding: removal is never
/// blocked, so the set may sit below `min` while the user edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionSet {
    category: SelectionCategory,
    selected: BTreeSet<String>,
    #[serde(skip)]
    edited: bool,
}

impl SelectionSet {
    pub fn new(category: SelectionCategory) -> Self {
        Self {
            category,
            selected: BTreeSet::new(),
            edited: false,
        }
    }

    /// Build a set from server state.
    pub fn hydrated<I, S>(category: SelectionCategory, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new(category);
        set.replace(ids);
        set
    }

    pub fn category(&self) -> SelectionCategory {
        self.category
    }

    pub fn bounds(&self) -> SelectionBounds {
        self.category.bounds()
    }

    pub fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id.trim())
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.selected.iter().cloned().collect()
    }

    /// Whether the user has mutated the set since it was created or hydrated.
    pub fn has_local_edits(&self) -> bool {
        self.edited
    }

    /// Add `id` if absent, remove it if present.
    ///
    /// Adding while already at `max` is rejected with
    /// [`SelectionError::CapacityExceeded`] and leaves the set untouched.
    pub fn toggle(&mut self, id: &str) -> Result<ToggleOutcome, SelectionError> {
        let Some(id) = normalize_one(id) else {
            return Ok(ToggleOutcome::Ignored);
        };

        if self.selected.remove(&id) {
            self.edited = true;
            return Ok(ToggleOutcome::Removed);
        }

        let max = self.bounds().max;
        if self.selected.len() >= max {
            #[cfg(feature = "tracing")]
            tracing::debug!(category = %self.category, max, "selection at capacity");
            return Err(SelectionError::CapacityExceeded {
                category: self.category,
                max,
            });
        }

        self.selected.insert(id);
        self.edited = true;
        Ok(ToggleOutcome::Added)
    }

    /// `selected.len() >= min`.
    pub fn is_complete(&self) -> bool {
        self.selected.len() >= self.bounds().min
    }

    /// Forward-navigation gate for this category's step.
    pub fn can_advance(&self) -> bool {
        self.category.gate_allows(self.selected.len())
    }

    /// Overwrite the set with server state. Only meant for load time.
    pub fn replace<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selected = normalize_ids(ids);
        self.edited = false;
    }
}
