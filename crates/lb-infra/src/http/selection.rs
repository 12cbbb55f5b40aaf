use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info_span, Instrument};

use lb_core::ports::{GatewayError, SelectionGatewayPort};
use lb_core::SelectionCategory;

use super::dto::{SelectionsRequest, SelectionsResponse};
use super::ApiClient;

/// `/api/user/{category}` CRUD.
pub struct HttpSelectionGateway {
    client: ApiClient,
}

impl HttpSelectionGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn path(category: SelectionCategory) -> String {
        format!("/api/user/{}", category.as_str())
    }
}

#[async_trait]
impl SelectionGatewayPort for HttpSelectionGateway {
    async fn fetch(&self, category: SelectionCategory) -> Result<Vec<String>, GatewayError> {
        let span = info_span!("infra.http.selection.fetch", category = %category);
        async {
            let body: Value = self.client.get_json(&Self::path(category)).await?;
            let ids = body
                .get(category.response_key())
                .cloned()
                .map(serde_json::from_value::<Vec<String>>)
                .transpose()
                .map_err(|err| GatewayError::Decode(err.to_string()))?
                .unwrap_or_default();
            debug!(count = ids.len(), "fetched saved selection");
            Ok(ids)
        }
        .instrument(span)
        .await
    }

    async fn replace(
        &self,
        category: SelectionCategory,
        ids: &[String],
    ) -> Result<Vec<String>, GatewayError> {
        let span = info_span!("infra.http.selection.replace", category = %category, size = ids.len());
        async {
            let body: SelectionsResponse = self
                .client
                .post_json(&Self::path(category), &SelectionsRequest { selections: ids })
                .await?;
            Ok(body.selections)
        }
        .instrument(span)
        .await
    }
}
