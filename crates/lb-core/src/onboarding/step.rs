use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::selection::SelectionCategory;

/// Onboarding step, in flow order.
///
/// 入门引导步骤（按流程顺序）。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum OnboardingStep {
    #[default]
    #[serde(rename = "interests")]
    Interests,
    #[serde(rename = "subcategories")]
    Subcategories,
    #[serde(rename = "deal-breakers")]
    DealBreakers,
    #[serde(rename = "complete")]
    Complete,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 4] = [
        OnboardingStep::Interests,
        OnboardingStep::Subcategories,
        OnboardingStep::DealBreakers,
        OnboardingStep::Complete,
    ];

    pub fn next(self) -> Option<Self> {
        match self {
            Self::Interests => Some(Self::Subcategories),
            Self::Subcategories => Some(Self::DealBreakers),
            Self::DealBreakers => Some(Self::Complete),
            Self::Complete => None,
        }
    }

    /// Category edited on this step; `Complete` has none.
    pub fn category(self) -> Option<SelectionCategory> {
        match self {
            Self::Interests => Some(SelectionCategory::Interests),
            Self::Subcategories => Some(SelectionCategory::Subcategories),
            Self::DealBreakers => Some(SelectionCategory::DealBreakers),
            Self::Complete => None,
        }
    }

    pub fn for_category(category: SelectionCategory) -> Self {
        match category {
            SelectionCategory::Interests => Self::Interests,
            SelectionCategory::Subcategories => Self::Subcategories,
            SelectionCategory::DealBreakers => Self::DealBreakers,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Interests => "interests",
            Self::Subcategories => "subcategories",
            Self::DealBreakers => "deal-breakers",
            Self::Complete => "complete",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Interests => "/interests",
            Self::Subcategories => "/subcategories",
            Self::DealBreakers => "/deal-breakers",
            Self::Complete => "/complete",
        }
    }
}

impl fmt::Display for OnboardingStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown onboarding step: {0}")]
pub struct UnknownStep(pub String);

impl FromStr for OnboardingStep {
    type Err = UnknownStep;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('/').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|step| step.as_str() == normalized)
            .or_else(|| (normalized == "dealbreakers").then_some(Self::DealBreakers))
            .ok_or(UnknownStep(normalized))
    }
}
