//! Thin reqwest wrapper shared by the gateway adapters.

use std::time::Duration;

use anyhow::Context;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use lb_core::ports::GatewayError;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Authenticated JSON client for the hosted backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, access_token: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        let token = access_token.trim();
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: (!token.is_empty()).then(|| token.to_string()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a session token is configured at all.
    pub fn has_credentials(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        self.send(self.http.get(self.url(path))).await
    }

    pub async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, GatewayError> {
        self.send(self.http.get(self.url(path)).query(query)).await
    }

    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    /// Send a request and report whether any HTTP response came back.
    pub async fn reachable(&self, path: &str) -> bool {
        match self.http.head(self.url(path)).send().await {
            Ok(_) => true,
            Err(err) => {
                debug!(error = %err, "probe request failed");
                false
            }
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, GatewayError> {
        let request = match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|err| GatewayError::Decode(err.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.error.or(b.message))
            .unwrap_or(body);
        warn!(status = status.as_u16(), %message, "backend returned an error status");
        Err(map_status_code(status, message))
    }
}

pub(crate) fn map_transport_error(error: reqwest::Error) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout
    } else if let Some(status) = error.status() {
        map_status_code(status, error.to_string())
    } else if error.is_decode() {
        GatewayError::Decode(error.to_string())
    } else {
        GatewayError::Network(error.to_string())
    }
}

pub(crate) fn map_status_code(code: StatusCode, message: String) -> GatewayError {
    match code {
        StatusCode::BAD_REQUEST => GatewayError::Validation(message),
        StatusCode::UNAUTHORIZED => GatewayError::Unauthorized,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => GatewayError::Timeout,
        _ if code.is_server_error() => GatewayError::Server {
            status: code.as_u16(),
            message,
        },
        _ => GatewayError::UnexpectedStatus {
            status: code.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client(url: &str, token: &str) -> ApiClient {
        ApiClient::new(url, token, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn status_codes_map_to_gateway_errors() {
        assert_eq!(
            map_status_code(StatusCode::BAD_REQUEST, "bad".into()),
            GatewayError::Validation("bad".into())
        );
        assert_eq!(
            map_status_code(StatusCode::UNAUTHORIZED, String::new()),
            GatewayError::Unauthorized
        );
        assert_eq!(
            map_status_code(StatusCode::GATEWAY_TIMEOUT, String::new()),
            GatewayError::Timeout
        );
        assert_eq!(
            map_status_code(StatusCode::REQUEST_TIMEOUT, String::new()),
            GatewayError::Timeout
        );
        assert!(map_status_code(StatusCode::BAD_GATEWAY, String::new()).is_retryable());
        assert_eq!(
            map_status_code(StatusCode::NOT_FOUND, "gone".into()),
            GatewayError::UnexpectedStatus {
                status: 404,
                message: "gone".into()
            }
        );
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client = client("http://localhost:3000/", "");
        assert_eq!(client.url("/api/interests"), "http://localhost:3000/api/interests");
        assert!(!client.has_credentials());
    }

    #[tokio::test]
    async fn bearer_token_is_sent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/ping")
            .match_header("authorization", "Bearer secret")
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        let body: serde_json::Value = client(&server.url(), " secret ")
            .get_json("/api/ping")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body, json!({"ok": true}));
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/user/interests")
            .match_body(Matcher::Json(json!({"selections": ["zzz"]})))
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"Invalid interest ids: zzz"}"#)
            .create_async()
            .await;

        let err = client(&server.url(), "t")
            .post_json::<_, serde_json::Value>(
                "/api/user/interests",
                &json!({"selections": ["zzz"]}),
            )
            .await
            .unwrap_err();

        assert_eq!(err, GatewayError::Validation("Invalid interest ids: zzz".into()));
    }

    #[tokio::test]
    async fn malformed_success_body_is_a_decode_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/interests")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let err = client(&server.url(), "t")
            .get_json::<serde_json::Value>("/api/interests")
            .await
            .unwrap_err();

        assert!(matches!(err, GatewayError::Decode(_)));
    }

    #[tokio::test]
    async fn connection_refused_is_a_network_error() {
        let err = client("http://127.0.0.1:9", "t")
            .get_json::<serde_json::Value>("/api/interests")
            .await
            .unwrap_err();

        assert!(err.is_retryable());
    }
}
