//! HTTP adapters for the hosted backend.
//!
//! | Method | Path | Adapter |
//! |---|---|---|
//! | GET/POST | `/api/user/{interests,subcategories,deal-breakers}` | [`HttpSelectionGateway`] |
//! | GET/POST | `/api/user/onboarding`, `/api/user/onboarding/complete` | [`HttpProfileGateway`] |
//! | GET | `/api/interests`, `/api/subcategories`, `/api/deal-breakers` | [`HttpCatalogGateway`] |

mod catalog;
mod client;
mod dto;
mod profile;
mod selection;

pub use catalog::HttpCatalogGateway;
pub use client::ApiClient;
pub use profile::HttpProfileGateway;
pub use selection::HttpSelectionGateway;
