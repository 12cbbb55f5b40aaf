use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::OnboardingStep;
use crate::ids::UserId;

/// Read-only projection of the signed-in user's onboarding progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingUser {
    pub id: UserId,
    pub onboarding_step: OnboardingStep,
    pub interests: BTreeSet<String>,
    pub sub_interests: BTreeSet<String>,
    pub dealbreakers: BTreeSet<String>,
    pub onboarding_complete: bool,
}

impl OnboardingUser {
    /// A fresh account that has not picked anything yet.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            onboarding_step: OnboardingStep::Interests,
            interests: BTreeSet::new(),
            sub_interests: BTreeSet::new(),
            dealbreakers: BTreeSet::new(),
            onboarding_complete: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.onboarding_complete
    }

    /// Step an arriving user should land on.
    pub fn resume_step(&self) -> OnboardingStep {
        if self.onboarding_complete {
            OnboardingStep::Complete
        } else {
            self.onboarding_step
        }
    }
}
