//! Catalog listing with the bundled fallback.

use std::sync::Arc;

use tracing::{debug, info_span, warn, Instrument};

use lb_core::catalog::fallback;
use lb_core::ports::{CatalogPort, GatewayError};
use lb_core::selection::normalize_ids;
use lb_core::{CatalogItem, CatalogListing, Subcategory};

/// Lists what the user can pick on each step.
///
/// Never fails: a gateway error or an empty table yields the bundled catalog,
/// tagged [`CatalogListing::Fallback`].
pub struct ListCatalog {
    catalog: Arc<dyn CatalogPort>,
}

impl ListCatalog {
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        Self { catalog }
    }

    pub async fn interests(&self) -> CatalogListing<CatalogItem> {
        let result = self
            .catalog
            .list_interests()
            .instrument(info_span!("usecase.catalog.interests"))
            .await;
        with_fallback("interests", result, fallback::interests)
    }

    /// Subcategories under `interest_ids`.
    pub async fn subcategories<S: AsRef<str>>(
        &self,
        interest_ids: &[S],
    ) -> CatalogListing<Subcategory> {
        let interest_ids: Vec<String> = normalize_ids(interest_ids).into_iter().collect();
        let result = self
            .catalog
            .list_subcategories(&interest_ids)
            .instrument(info_span!(
                "usecase.catalog.subcategories",
                interests = interest_ids.len()
            ))
            .await;
        with_fallback("subcategories", result, || {
            fallback::subcategories(&interest_ids)
        })
    }

    pub async fn deal_breakers(&self) -> CatalogListing<CatalogItem> {
        let result = self
            .catalog
            .list_deal_breakers()
            .instrument(info_span!("usecase.catalog.deal_breakers"))
            .await;
        with_fallback("deal_breakers", result, fallback::deal_breakers)
    }
}

fn with_fallback<T>(
    table: &'static str,
    result: Result<Vec<T>, GatewayError>,
    fallback: impl FnOnce() -> Vec<T>,
) -> CatalogListing<T> {
    match result {
        Ok(rows) if !rows.is_empty() => {
            debug!(table, count = rows.len(), "catalog loaded");
            CatalogListing::FromDatabase(rows)
        }
        Ok(_) => {
            warn!(table, "catalog table empty, using bundled catalog");
            CatalogListing::Fallback(fallback())
        }
        Err(err) => {
            warn!(table, error = %err, "catalog fetch failed, using bundled catalog");
            CatalogListing::Fallback(fallback())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub Catalog {}

        #[async_trait]
        impl CatalogPort for Catalog {
            async fn list_interests(&self) -> Result<Vec<CatalogItem>, GatewayError>;
            async fn list_subcategories(
                &self,
                interest_ids: &[String],
            ) -> Result<Vec<Subcategory>, GatewayError>;
            async fn list_deal_breakers(&self) -> Result<Vec<CatalogItem>, GatewayError>;
        }
    }

    #[tokio::test]
    async fn test_rows_from_database_are_passed_through() {
        let mut catalog = MockCatalog::new();
        catalog.expect_list_deal_breakers().returning(|| {
            Ok(vec![CatalogItem {
                id: "punctuality".into(),
                label: "Punctuality".into(),
            }])
        });

        let listing = ListCatalog::new(Arc::new(catalog)).deal_breakers().await;

        assert!(!listing.is_fallback());
        assert_eq!(listing.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_gateway_error_uses_fallback() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_list_interests()
            .returning(|| Err(GatewayError::Timeout));

        let listing = ListCatalog::new(Arc::new(catalog)).interests().await;

        assert!(listing.is_fallback());
        assert_eq!(listing.into_rows(), fallback::interests());
    }

    #[tokio::test]
    async fn test_empty_subcategories_fall_back_filtered_by_interest() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_list_subcategories()
            .withf(|ids| ids.len() == 1 && ids[0] == "food-drink")
            .returning(|_| Ok(Vec::new()));

        let listing = ListCatalog::new(Arc::new(catalog))
            .subcategories(&[" food-drink ", ""])
            .await;

        assert!(listing.is_fallback());
        assert!(listing.rows().iter().any(|row| row.id == "sushi"));
        assert!(listing
            .rows()
            .iter()
            .all(|row| row.interest_id == "food-drink"));
    }
}
