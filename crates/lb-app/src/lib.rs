//! LocalBiz Application Orchestration Layer
//!
//! This crate contains the onboarding use cases: the selection sync engine,
//! the flow orchestrator, hydration and catalog listing.

pub mod deps;
pub mod usecases;

pub use deps::AppDeps;
pub use usecases::{
    FlowError, FlowOutcome, HydrateSelection, ListCatalog, OnboardingFlow, SyncEngine,
    SyncSnapshot,
};
