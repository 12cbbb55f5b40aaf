use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Onboarding selection category.
///
/// 入门引导选择类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SelectionCategory {
    #[serde(rename = "interests")]
    Interests,
    #[serde(rename = "subcategories")]
    Subcategories,
    #[serde(rename = "deal-breakers", alias = "dealbreakers")]
    DealBreakers,
}

/// Inclusive cardinality bounds for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionBounds {
    pub min: usize,
    pub max: usize,
}

impl SelectionBounds {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, count: usize) -> bool {
        self.min <= count && count <= self.max
    }
}

impl SelectionCategory {
    pub const ALL: [SelectionCategory; 3] = [
        SelectionCategory::Interests,
        SelectionCategory::Subcategories,
        SelectionCategory::DealBreakers,
    ];

    pub fn bounds(self) -> SelectionBounds {
        match self {
            Self::Interests => SelectionBounds::new(3, 6),
            Self::Subcategories => SelectionBounds::new(3, 12),
            Self::DealBreakers => SelectionBounds::new(2, 3),
        }
    }

    /// Whether `count` selections are enough to leave this category's step.
    ///
    /// Interests and subcategories only need the minimum; dealbreakers must
    /// sit inside `[2, 3]`.
    pub fn gate_allows(self, count: usize) -> bool {
        let bounds = self.bounds();
        match self {
            Self::DealBreakers => bounds.contains(count),
            Self::Interests | Self::Subcategories => count >= bounds.min,
        }
    }

    /// Path segment under `/api/user/` and the onboarding route name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interests => "interests",
            Self::Subcategories => "subcategories",
            Self::DealBreakers => "deal-breakers",
        }
    }

    /// JSON key the backend uses for this category's id list.
    pub fn response_key(self) -> &'static str {
        match self {
            Self::Interests => "interests",
            Self::Subcategories => "subcategories",
            Self::DealBreakers => "dealBreakers",
        }
    }
}

impl fmt::Display for SelectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown selection category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for SelectionCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interests" => Ok(Self::Interests),
            "subcategories" | "sub-interests" => Ok(Self::Subcategories),
            "deal-breakers" | "dealbreakers" => Ok(Self::DealBreakers),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}
