mod monitor;

pub use monitor::NetworkStatusMonitor;
