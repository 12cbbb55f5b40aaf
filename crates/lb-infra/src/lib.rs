pub mod http;
pub mod network;
pub mod time;

pub use http::{ApiClient, HttpCatalogGateway, HttpProfileGateway, HttpSelectionGateway};
pub use network::NetworkStatusMonitor;
pub use time::{SystemClock, TokioScheduler};
