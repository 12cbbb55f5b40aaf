use serde::Serialize;

use crate::ports::GatewayError;

/// Why a persist call returned before the payload became durable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeferReason {
    /// Client is offline; replayed on reconnect.
    Offline,
    /// A newer payload for the category arrived while this one waited behind
    /// the in-flight call; only the newest one is sent.
    Superseded,
}

/// Failures surfaced to the caller of a persist.
///
/// Local selection state is never rolled back on any of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum SyncFailure {
    #[error("selection rejected: {message}")]
    Validation { message: String },

    #[error("session expired, sign in again")]
    Unauthorized,

    #[error("network unavailable after {attempts} attempt(s): {message}")]
    Network { attempts: u32, message: String },

    #[error("unexpected gateway response: {message}")]
    Unexpected { message: String },
}

impl SyncFailure {
    pub fn from_gateway(err: &GatewayError, attempts: u32) -> Self {
        match err {
            GatewayError::Validation(message) => Self::Validation {
                message: message.clone(),
            },
            GatewayError::Unauthorized => Self::Unauthorized,
            err if err.is_retryable() => Self::Network {
                attempts,
                message: err.to_string(),
            },
            err => Self::Unexpected {
                message: err.to_string(),
            },
        }
    }

    /// Blocking failures need user action; network ones only warrant a soft warning.
    pub fn is_blocking(&self) -> bool {
        !matches!(self, Self::Network { .. })
    }
}

/// Result of `persist`: saved, captured for later, or failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistOutcome {
    Persisted,
    Deferred(DeferReason),
    Failed(SyncFailure),
}

impl PersistOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, Self::Persisted)
    }

    pub fn failure(&self) -> Option<&SyncFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}
