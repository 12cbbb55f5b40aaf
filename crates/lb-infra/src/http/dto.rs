//! Wire shapes of the backend JSON bodies.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use lb_core::{CatalogItem, OnboardingStep, OnboardingUser, Subcategory, UserId};

#[derive(Debug, Serialize)]
pub(crate) struct SelectionsRequest<'a> {
    pub selections: &'a [String],
}

/// `{ ok, message, selections }`
#[derive(Debug, Deserialize)]
pub(crate) struct SelectionsResponse {
    #[serde(default)]
    pub selections: Vec<String>,
}

/// `{ interests: [{id, name}] }`
#[derive(Debug, Deserialize)]
pub(crate) struct InterestsResponse {
    #[serde(default)]
    pub interests: Vec<InterestRow>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct InterestRow {
    pub id: String,
    #[serde(alias = "label")]
    pub name: String,
}

impl From<InterestRow> for CatalogItem {
    fn from(row: InterestRow) -> Self {
        CatalogItem {
            id: row.id,
            label: row.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubcategoriesResponse {
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DealBreakersResponse {
    #[serde(default, rename = "dealBreakers")]
    pub deal_breakers: Vec<CatalogItem>,
}

#[derive(Debug, Serialize)]
pub(crate) struct StepRequest {
    pub step: OnboardingStep,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OkResponse {
    #[serde(default)]
    pub ok: bool,
}

/// `GET /api/user/onboarding`
#[derive(Debug, Deserialize)]
pub(crate) struct OnboardingProfileResponse {
    pub user_id: String,
    #[serde(default)]
    pub onboarding_step: Option<OnboardingStep>,
    #[serde(default)]
    pub onboarding_complete: bool,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub sub_interests: Vec<String>,
    #[serde(default)]
    pub dealbreakers: Vec<String>,
}

impl From<OnboardingProfileResponse> for OnboardingUser {
    fn from(body: OnboardingProfileResponse) -> Self {
        let ids = |values: Vec<String>| -> BTreeSet<String> {
            lb_core::selection::normalize_ids(values)
        };
        OnboardingUser {
            id: UserId::from(body.user_id),
            onboarding_step: body.onboarding_step.unwrap_or_default(),
            interests: ids(body.interests),
            sub_interests: ids(body.sub_interests),
            dealbreakers: ids(body.dealbreakers),
            onboarding_complete: body.onboarding_complete,
        }
    }
}
