use serde::Serialize;

use super::{OnboardingStep, OnboardingUser};

pub const ENTRY_PATH: &str = "/onboarding";
pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/home";

/// A navigable onboarding location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingRoute {
    /// Landing page, reachable while signed out.
    Entry,
    Step(OnboardingStep),
}

impl OnboardingRoute {
    pub fn from_path(path: &str) -> Option<Self> {
        let path = path.trim().trim_end_matches('/');
        if path == ENTRY_PATH {
            return Some(Self::Entry);
        }
        path.strip_prefix('/')
            .and_then(|name| name.parse::<OnboardingStep>().ok())
            .map(Self::Step)
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Entry => ENTRY_PATH,
            Self::Step(step) => step.path(),
        }
    }
}

/// Where a navigation request ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    Allow,
    RedirectToLogin,
    RedirectHome,
    RedirectToStep(OnboardingStep),
}

impl GuardDecision {
    /// Redirect target, `None` when the request is allowed.
    pub fn location(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin => Some(LOGIN_PATH),
            Self::RedirectHome => Some(HOME_PATH),
            Self::RedirectToStep(step) => Some(step.path()),
        }
    }
}

/// Route-level guard evaluated on every onboarding navigation.
pub struct RouteGuard;

impl RouteGuard {
    /// `viewer` is `None` for signed-out visitors.
    pub fn evaluate(viewer: Option<&OnboardingUser>, route: OnboardingRoute) -> GuardDecision {
        let Some(user) = viewer else {
            return match route {
                OnboardingRoute::Entry => GuardDecision::Allow,
                OnboardingRoute::Step(_) => GuardDecision::RedirectToLogin,
            };
        };

        if user.is_complete() {
            // The completion page is where a just-finished user lands.
            return match route {
                OnboardingRoute::Step(OnboardingStep::Complete) => GuardDecision::Allow,
                _ => GuardDecision::RedirectHome,
            };
        }

        let resume = user.resume_step();
        match route {
            OnboardingRoute::Entry => GuardDecision::RedirectToStep(resume),
            OnboardingRoute::Step(requested) if requested > resume => {
                GuardDecision::RedirectToStep(resume)
            }
            OnboardingRoute::Step(_) => GuardDecision::Allow,
        }
    }
}
