mod orchestrator;

pub use orchestrator::{FlowError, FlowOutcome, OnboardingFlow};
