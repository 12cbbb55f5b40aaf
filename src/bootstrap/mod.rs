//! Process bootstrap: configuration, tracing and dependency wiring.

pub mod config;
pub mod tracing;
pub mod wiring;

pub use self::config::load_app_config;
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{wire_dependencies, AppServices, WiredDependencies};
