//! Static catalog shipped with the client.
//!
//! Used when the backend catalog is unreachable or empty. Ids match the
//! seeded catalog tables so fallback selections still validate server-side.

use super::{CatalogItem, Subcategory};

const INTERESTS: &[(&str, &str)] = &[
    ("food-drink", "Food & Drink"),
    ("beauty-wellness", "Beauty & Wellness"),
    ("professional-services", "Professional Services"),
    ("outdoors-adventure", "Outdoors & Adventure"),
    ("experiences-entertainment", "Entertainment & Experiences"),
    ("arts-culture", "Arts & Culture"),
    ("family-pets", "Family & Pets"),
    ("shopping-lifestyle", "Shopping & Lifestyle"),
];

const SUBCATEGORIES: &[(&str, &str, &str)] = &[
    ("restaurants", "Restaurants", "food-drink"),
    ("cafes", "Cafés & Coffee", "food-drink"),
    ("bars", "Bars & Pubs", "food-drink"),
    ("sushi", "Sushi", "food-drink"),
    ("fast-food", "Fast Food", "food-drink"),
    ("fine-dining", "Fine Dining", "food-drink"),
    ("gyms", "Gyms & Fitness", "beauty-wellness"),
    ("spas", "Spas", "beauty-wellness"),
    ("salons", "Hair Salons", "beauty-wellness"),
    ("wellness", "Wellness Centers", "beauty-wellness"),
    ("nail-salons", "Nail Salons", "beauty-wellness"),
    ("education-learning", "Education & Learning", "professional-services"),
    ("transport-travel", "Transport & Travel", "professional-services"),
    ("finance-insurance", "Finance & Insurance", "professional-services"),
    ("plumbers", "Plumbers", "professional-services"),
    ("electricians", "Electricians", "professional-services"),
    ("legal-services", "Legal Services", "professional-services"),
    ("hiking", "Hiking", "outdoors-adventure"),
    ("cycling", "Cycling", "outdoors-adventure"),
    ("water-sports", "Water Sports", "outdoors-adventure"),
    ("camping", "Camping", "outdoors-adventure"),
    ("events-festivals", "Events & Festivals", "experiences-entertainment"),
    ("theatre", "Theatre", "experiences-entertainment"),
    ("concerts", "Concerts", "experiences-entertainment"),
    ("brewery", "Brewery", "experiences-entertainment"),
    ("museums", "Museums", "arts-culture"),
    ("galleries", "Art Galleries", "arts-culture"),
    ("theaters", "Theaters", "arts-culture"),
    ("concert-halls", "Concert Halls", "arts-culture"),
    ("family-activities", "Family Activities", "family-pets"),
    ("pet-services", "Pet Services", "family-pets"),
    ("childcare", "Childcare", "family-pets"),
    ("veterinarians", "Veterinarians", "family-pets"),
    ("fashion", "Fashion & Clothing", "shopping-lifestyle"),
    ("electronics", "Electronics", "shopping-lifestyle"),
    ("home-decor", "Home Decor", "shopping-lifestyle"),
    ("books", "Books & Media", "shopping-lifestyle"),
];

const DEAL_BREAKERS: &[(&str, &str)] = &[
    ("trustworthiness", "Trustworthiness"),
    ("punctuality", "Punctuality"),
    ("friendliness", "Friendliness"),
    ("value-for-money", "Value for Money"),
];

pub fn interests() -> Vec<CatalogItem> {
    items(INTERESTS)
}

pub fn deal_breakers() -> Vec<CatalogItem> {
    items(DEAL_BREAKERS)
}

/// Subcategories under any of `interest_ids`; everything when empty.
pub fn subcategories(interest_ids: &[String]) -> Vec<Subcategory> {
    SUBCATEGORIES
        .iter()
        .filter(|(_, _, interest)| {
            interest_ids.is_empty() || interest_ids.iter().any(|id| id == interest)
        })
        .map(|(id, label, interest)| Subcategory {
            id: id.to_string(),
            label: label.to_string(),
            interest_id: interest.to_string(),
        })
        .collect()
}

fn items(rows: &[(&str, &str)]) -> Vec<CatalogItem> {
    rows.iter()
        .map(|(id, label)| CatalogItem {
            id: id.to_string(),
            label: label.to_string(),
        })
        .collect()
}
