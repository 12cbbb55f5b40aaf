//! # lb-core
//!
//! Core domain models and business logic for the LocalBiz onboarding client.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod catalog;
pub mod config;
pub mod ids;
pub mod onboarding;
pub mod ports;
pub mod selection;
pub mod sync;

// Re-export commonly used types at the crate root
pub use catalog::{CatalogItem, CatalogListing, Subcategory};
pub use config::AppConfig;
pub use ids::UserId;
pub use onboarding::{GuardDecision, OnboardingRoute, OnboardingStep, OnboardingUser};
pub use selection::{SelectionBounds, SelectionCategory, SelectionError, SelectionSet, ToggleOutcome};
pub use sync::{DeferReason, PersistOutcome, RetryPolicy, SyncFailure, SyncQueueEntry, SyncStatus};
