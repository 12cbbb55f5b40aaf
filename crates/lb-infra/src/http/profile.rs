use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, info_span, Instrument};

use lb_core::ports::{GatewayError, ProfilePort};
use lb_core::{OnboardingStep, OnboardingUser};

use super::dto::{OkResponse, OnboardingProfileResponse, StepRequest};
use super::ApiClient;

const ONBOARDING_PATH: &str = "/api/user/onboarding";
const COMPLETE_PATH: &str = "/api/user/onboarding/complete";

/// Onboarding progress of the signed-in user.
pub struct HttpProfileGateway {
    client: ApiClient,
}

impl HttpProfileGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfilePort for HttpProfileGateway {
    async fn current_user(&self) -> Result<Option<OnboardingUser>, GatewayError> {
        if !self.client.has_credentials() {
            debug!("no access token configured, treating as signed out");
            return Ok(None);
        }

        let result: Result<OnboardingProfileResponse, GatewayError> = self
            .client
            .get_json(ONBOARDING_PATH)
            .instrument(info_span!("infra.http.profile.current_user"))
            .await;

        match result {
            Ok(body) => Ok(Some(body.into())),
            Err(GatewayError::Unauthorized) => {
                debug!("session rejected, treating as signed out");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn record_step(&self, step: OnboardingStep) -> Result<(), GatewayError> {
        let span = info_span!("infra.http.profile.record_step", step = %step);
        async {
            let body: OkResponse = self
                .client
                .post_json(ONBOARDING_PATH, &StepRequest { step })
                .await?;
            debug!(ok = body.ok, "onboarding step recorded");
            Ok(())
        }
        .instrument(span)
        .await
    }

    async fn complete_onboarding(&self) -> Result<(), GatewayError> {
        let span = info_span!("infra.http.profile.complete_onboarding");
        async {
            let body: OkResponse = self.client.post_json(COMPLETE_PATH, &json!({})).await?;
            info!(ok = body.ok, "onboarding marked complete");
            Ok(())
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use std::time::Duration;

    fn gateway(url: &str, token: &str) -> HttpProfileGateway {
        HttpProfileGateway::new(ApiClient::new(url, token, Duration::from_secs(5)).unwrap())
    }

    #[tokio::test]
    async fn current_user_parses_profile() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", ONBOARDING_PATH)
            .with_status(200)
            .with_body(
                r#"{"user_id":"u-1","onboarding_step":"subcategories","onboarding_complete":false,
                    "interests":["food-drink","arts-culture","family-pets"],"sub_interests":[],"dealbreakers":[]}"#,
            )
            .create_async()
            .await;

        let user = gateway(&server.url(), "t")
            .current_user()
            .await
            .unwrap()
            .expect("signed in");

        assert_eq!(user.onboarding_step, OnboardingStep::Subcategories);
        assert_eq!(user.interests.len(), 3);
        assert!(!user.is_complete());
    }

    #[tokio::test]
    async fn current_user_is_none_on_401() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", ONBOARDING_PATH)
            .with_status(401)
            .with_body(r#"{"error":"Unauthorized"}"#)
            .create_async()
            .await;

        assert!(gateway(&server.url(), "expired")
            .current_user()
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn current_user_without_token_skips_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", ONBOARDING_PATH)
            .expect(0)
            .create_async()
            .await;

        assert!(gateway(&server.url(), "").current_user().await.unwrap().is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn record_step_posts_step_name() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", ONBOARDING_PATH)
            .match_body(Matcher::Json(serde_json::json!({"step": "deal-breakers"})))
            .with_status(200)
            .with_body(r#"{"ok":true}"#)
            .create_async()
            .await;

        gateway(&server.url(), "t")
            .record_step(OnboardingStep::DealBreakers)
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn complete_failure_is_surfaced() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", COMPLETE_PATH)
            .with_status(500)
            .with_body(r#"{"error":"update failed"}"#)
            .create_async()
            .await;

        let err = gateway(&server.url(), "t")
            .complete_onboarding()
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::Server {
                status: 500,
                message: "update failed".into()
            }
        );
    }
}
