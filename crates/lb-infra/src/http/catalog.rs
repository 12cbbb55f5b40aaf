use async_trait::async_trait;
use tracing::{info_span, Instrument};

use lb_core::ports::{CatalogPort, GatewayError};
use lb_core::{CatalogItem, Subcategory};

use super::dto::{DealBreakersResponse, InterestsResponse, SubcategoriesResponse};
use super::ApiClient;

/// Read-only catalog tables.
pub struct HttpCatalogGateway {
    client: ApiClient,
}

impl HttpCatalogGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogPort for HttpCatalogGateway {
    async fn list_interests(&self) -> Result<Vec<CatalogItem>, GatewayError> {
        let body: InterestsResponse = self
            .client
            .get_json("/api/interests")
            .instrument(info_span!("infra.http.catalog.interests"))
            .await?;
        Ok(body.interests.into_iter().map(CatalogItem::from).collect())
    }

    async fn list_subcategories(
        &self,
        interest_ids: &[String],
    ) -> Result<Vec<Subcategory>, GatewayError> {
        let query = [("interests", interest_ids.join(","))];
        let body: SubcategoriesResponse = self
            .client
            .get_json_with_query("/api/subcategories", &query)
            .instrument(info_span!("infra.http.catalog.subcategories"))
            .await?;
        Ok(body.subcategories)
    }

    async fn list_deal_breakers(&self) -> Result<Vec<CatalogItem>, GatewayError> {
        let body: DealBreakersResponse = self
            .client
            .get_json("/api/deal-breakers")
            .instrument(info_span!("infra.http.catalog.deal_breakers"))
            .await?;
        Ok(body.deal_breakers)
    }
}
