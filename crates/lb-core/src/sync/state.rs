use serde::{Deserialize, Serialize};

/// Selection persistence state machine
///
/// Design principle: This is a pure type state machine with only state
/// definitions and transition validation logic. The attempt loop, timers
/// and network observation live in the application layer (lb-app).
///
/// State transitions:
///
/// ```text
/// Pending ──→ InFlight ──→ Succeeded
///   │            │
///   │            ├─→ BackoffWait ──→ InFlight
///   │            │
///   │            └─→ Failed
///   │
///   └─→ QueuedOffline ──→ InFlight   (reconnect replay)
///
/// Pending | BackoffWait | Failed ──→ QueuedOffline
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Waiting to be sent
    Pending,

    /// A persist call is awaiting the gateway
    InFlight,

    /// Last attempt hit a network-layer failure, waiting before retrying
    BackoffWait,

    /// Gateway accepted the payload
    Succeeded,

    /// Gave up: non-retryable failure or attempts exhausted
    Failed,

    /// Captured while offline, replayed on reconnect
    QueuedOffline,
}

impl SyncStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Check if the entry still waits to be sent
    pub fn is_waiting(self) -> bool {
        matches!(self, Self::Pending | Self::BackoffWait | Self::QueuedOffline)
    }

    /// Start an attempt
    pub fn begin_attempt(self) -> Option<Self> {
        match self {
            Self::Pending | Self::BackoffWait | Self::QueuedOffline => Some(Self::InFlight),
            _ => None,
        }
    }

    /// Transition after the gateway accepted the payload
    pub fn on_succeeded(self) -> Self {
        match self {
            Self::InFlight => Self::Succeeded,
            _ => self,
        }
    }

    /// Transition after a failed attempt
    ///
    /// `will_retry` is decided by the caller from the failure class and the
    /// retry budget.
    pub fn on_failed(self, will_retry: bool) -> Self {
        match self {
            Self::InFlight if will_retry => Self::BackoffWait,
            Self::InFlight => Self::Failed,
            _ => self,
        }
    }

    /// Park the entry until the network comes back
    pub fn go_offline(self) -> Option<Self> {
        match self {
            Self::Pending | Self::BackoffWait | Self::Failed | Self::QueuedOffline => {
                Some(Self::QueuedOffline)
            }
            _ => None,
        }
    }
}
