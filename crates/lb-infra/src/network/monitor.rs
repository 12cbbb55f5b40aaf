//! Connectivity monitor.
//!
//! Holds the current online flag in a `watch` channel. A background probe
//! flips it based on whether the backend answers at all; any HTTP status
//! counts as online.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, Instrument};

use lb_core::ports::NetworkStatusPort;

use crate::http::ApiClient;

pub struct NetworkStatusMonitor {
    tx: watch::Sender<bool>,
}

impl NetworkStatusMonitor {
    pub fn new(initially_online: bool) -> Self {
        let (tx, _rx) = watch::channel(initially_online);
        Self { tx }
    }

    /// Publish a status; subscribers only wake on an actual change.
    pub fn set_online(&self, online: bool) {
        let changed = self.tx.send_if_modified(|current| {
            if *current == online {
                return false;
            }
            *current = online;
            true
        });
        if changed {
            info!(online, "network status changed");
        }
    }

    /// Probe `client` once and publish the result.
    pub async fn probe(&self, client: &ApiClient) -> bool {
        let online = client.reachable("/").await;
        debug!(online, "connectivity probe");
        self.set_online(online);
        online
    }

    /// Probe every `interval` until the task is aborted.
    pub fn spawn_probe(self: &Arc<Self>, client: ApiClient, interval: Duration) -> JoinHandle<()> {
        let monitor = Arc::clone(self);
        tokio::spawn(
            async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    monitor.probe(&client).await;
                }
            }
            .instrument(info_span!("infra.network.probe")),
        )
    }
}

impl NetworkStatusPort for NetworkStatusMonitor {
    fn is_online(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn subscribers_only_see_real_changes() {
        let monitor = NetworkStatusMonitor::new(true);
        let mut rx = monitor.subscribe();

        monitor.set_online(true);
        assert!(!rx.has_changed().unwrap());

        monitor.set_online(false);
        assert!(rx.has_changed().unwrap());
        assert!(!*rx.borrow_and_update());
        assert!(!monitor.is_online());
    }

    #[tokio::test]
    async fn probe_marks_online_on_any_http_response() {
        let mut server = Server::new_async().await;
        server
            .mock("HEAD", "/")
            .with_status(404)
            .create_async()
            .await;
        let client = ApiClient::new(&server.url(), "", Duration::from_secs(5)).unwrap();
        let monitor = NetworkStatusMonitor::new(false);

        assert!(monitor.probe(&client).await);
        assert!(monitor.is_online());
    }

    #[tokio::test]
    async fn probe_marks_offline_when_unreachable() {
        let client =
            ApiClient::new("http://127.0.0.1:9", "", Duration::from_millis(500)).unwrap();
        let monitor = NetworkStatusMonitor::new(true);

        assert!(!monitor.probe(&client).await);
        assert!(!monitor.is_online());
    }
}
