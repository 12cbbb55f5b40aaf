//! Profile port
//!
//! Read access to the onboarding projection of the signed-in user, plus the
//! two progress writes the flow performs.

use async_trait::async_trait;

use super::GatewayError;
use crate::onboarding::{OnboardingStep, OnboardingUser};

#[async_trait]
pub trait ProfilePort: Send + Sync {
    /// `None` when nobody is signed in.
    async fn current_user(&self) -> Result<Option<OnboardingUser>, GatewayError>;

    /// Record `step` as the furthest step reached.
    async fn record_step(&self, step: OnboardingStep) -> Result<(), GatewayError>;

    /// Set `onboarding_complete = true` and `onboarding_step = complete` in one update.
    async fn complete_onboarding(&self) -> Result<(), GatewayError>;
}
