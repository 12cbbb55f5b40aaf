//! Selection catalogs: what the user can pick from on each step.

pub mod fallback;

use serde::{Deserialize, Serialize};

/// An interest or dealbreaker option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub label: String,
}

/// A subcategory option, grouped under its parent interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: String,
    pub label: String,
    pub interest_id: String,
}

/// Catalog rows tagged with where they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "rows", rename_all = "snake_case")]
pub enum CatalogListing<T> {
    FromDatabase(Vec<T>),
    Fallback(Vec<T>),
}

impl<T> CatalogListing<T> {
    pub fn rows(&self) -> &[T] {
        match self {
            Self::FromDatabase(rows) | Self::Fallback(rows) => rows,
        }
    }

    pub fn into_rows(self) -> Vec<T> {
        match self {
            Self::FromDatabase(rows) | Self::Fallback(rows) => rows,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_serializes_with_source_tag() {
        let listing = CatalogListing::Fallback(vec![CatalogItem {
            id: "punctuality".into(),
            label: "Punctuality".into(),
        }]);
        let json = serde_json::to_value(&listing).unwrap();
        assert_eq!(json["source"], "fallback");
        assert_eq!(json["rows"][0]["id"], "punctuality");
        assert!(listing.is_fallback());
    }
}
