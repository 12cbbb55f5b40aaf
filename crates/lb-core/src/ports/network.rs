use tokio::sync::watch;

/// Online/offline status of the client.
pub trait NetworkStatusPort: Send + Sync {
    fn is_online(&self) -> bool;

    /// Receiver that observes every status change.
    fn subscribe(&self) -> watch::Receiver<bool>;
}
