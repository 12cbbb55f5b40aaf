use thiserror::Error;

/// Failure talking to the persistence gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    /// 400 with the server's `{ error }` message.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("not authenticated")]
    Unauthorized,

    #[error("unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Transport failures, timeouts and 5xx are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout | Self::Network(_) | Self::Server { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(GatewayError::Timeout.is_retryable());
        assert!(GatewayError::Network("connection reset".into()).is_retryable());
        assert!(GatewayError::Server {
            status: 503,
            message: String::new()
        }
        .is_retryable());

        assert!(!GatewayError::Validation("unknown id".into()).is_retryable());
        assert!(!GatewayError::Unauthorized.is_retryable());
        assert!(!GatewayError::UnexpectedStatus {
            status: 404,
            message: String::new()
        }
        .is_retryable());
        assert!(!GatewayError::Decode("eof".into()).is_retryable());
    }
}
