use async_trait::async_trait;

use super::GatewayError;
use crate::catalog::{CatalogItem, Subcategory};

/// Read-only catalog tables the user picks from.
#[async_trait]
pub trait CatalogPort: Send + Sync {
    async fn list_interests(&self) -> Result<Vec<CatalogItem>, GatewayError>;

    /// Subcategories under any of `interest_ids`.
    async fn list_subcategories(
        &self,
        interest_ids: &[String],
    ) -> Result<Vec<Subcategory>, GatewayError>;

    async fn list_deal_breakers(&self) -> Result<Vec<CatalogItem>, GatewayError>;
}
