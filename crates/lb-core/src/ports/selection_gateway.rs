use async_trait::async_trait;

use super::GatewayError;
use crate::selection::SelectionCategory;

/// Per-category CRUD for the signed-in user's saved selections.
///
/// The write contract replaces the whole set; there is no delta API.
#[async_trait]
pub trait SelectionGatewayPort: Send + Sync {
    /// Saved ids for `category`.
    async fn fetch(&self, category: SelectionCategory) -> Result<Vec<String>, GatewayError>;

    /// Replace the saved set for `category` with `ids`.
    /// Returns the set as the server stored it.
    async fn replace(
        &self,
        category: SelectionCategory,
        ids: &[String],
    ) -> Result<Vec<String>, GatewayError>;
}
