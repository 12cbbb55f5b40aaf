pub mod catalog;
pub mod onboarding;
pub mod selection;
pub mod sync;

pub use catalog::ListCatalog;
pub use onboarding::{FlowError, FlowOutcome, OnboardingFlow};
pub use selection::HydrateSelection;
pub use sync::{SyncEngine, SyncSnapshot};
