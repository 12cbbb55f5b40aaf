//! Onboarding domain models
//!
//! This module defines the core domain models for the onboarding flow:
//! the four steps, the user's recorded progress, the pure transition
//! function and the route guard.

pub mod guard;
pub mod state_machine;
mod step;
mod user;

pub use guard::{GuardDecision, OnboardingRoute, RouteGuard, ENTRY_PATH, HOME_PATH, LOGIN_PATH};
pub use state_machine::{OnboardingAction, OnboardingEvent, OnboardingStateMachine};
pub use step::{OnboardingStep, UnknownStep};
pub use user::OnboardingUser;
