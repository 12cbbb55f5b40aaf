//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `lb-app` and the
//! adapters in `lb-infra`. Everything that touches the network, the wall
//! clock or a timer goes through one of these traits so the use cases can be
//! driven by fakes in tests.

mod catalog;
mod clock;
mod errors;
mod network;
mod profile;
mod scheduler;
mod selection_gateway;

pub use catalog::CatalogPort;
pub use clock::ClockPort;
pub use errors::GatewayError;
pub use network::NetworkStatusPort;
pub use profile::ProfilePort;
pub use scheduler::SchedulerPort;
pub use selection_gateway::SelectionGatewayPort;
