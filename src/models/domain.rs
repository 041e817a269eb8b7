use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::terms::{TermSet, WILDCARD_TERM};

/// Which registry a company belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Producer,
}

impl Role {
    /// The registry searched when this role is the anchor
    pub fn counterpart(self) -> Role {
        match self {
            Role::Buyer => Role::Producer,
            Role::Producer => Role::Buyer,
        }
    }

    /// Name of the product-text column for this role's rows
    pub fn product_column(self) -> &'static str {
        match self {
            Role::Buyer => "produce_needed",
            Role::Producer => "type_produced",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Producer => "producer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A buyer or producer record, validated once when the snapshot is loaded
///
/// `product_terms` is the raw comma-separated text ("needed" for buyers,
/// "produced" for producers). The normalized term set and the lower-cased
/// search text are derived here and never recomputed per query.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub company_name: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub product_terms: String,
    terms: TermSet,
    search_text: String,
}

impl Entity {
    pub fn new(
        company_name: impl Into<String>,
        city: impl Into<String>,
        latitude: f64,
        longitude: f64,
        product_terms: impl Into<String>,
    ) -> Self {
        let product_terms = product_terms.into();
        let terms = TermSet::parse(&product_terms);
        let search_text = product_terms.to_lowercase();

        Self {
            company_name: company_name.into(),
            city: city.into(),
            latitude,
            longitude,
            product_terms,
            terms,
            search_text,
        }
    }

    /// Normalized product terms
    pub fn terms(&self) -> &TermSet {
        &self.terms
    }

    /// Lower-cased raw product text, used for substring matching
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// True when this record matches any counterpart unconditionally
    ///
    /// Only a product text of exactly `all` qualifies; `"all,"` or
    /// `"all, eggs"` do not.
    pub fn is_wildcard(&self) -> bool {
        self.search_text.trim() == WILDCARD_TERM
    }
}

/// Immutable view of both registries shared by all in-flight queries
#[derive(Debug, Clone, Default)]
pub struct MarketSnapshot {
    pub generation: u64,
    pub buyers: Vec<Entity>,
    pub producers: Vec<Entity>,
}

impl MarketSnapshot {
    pub fn new(generation: u64, buyers: Vec<Entity>, producers: Vec<Entity>) -> Self {
        Self {
            generation,
            buyers,
            producers,
        }
    }

    /// All records of one role in load order
    pub fn entities(&self, role: Role) -> &[Entity] {
        match role {
            Role::Buyer => &self.buyers,
            Role::Producer => &self.producers,
        }
    }

    /// Look up a company by exact name; the first record wins on duplicates
    pub fn find(&self, role: Role, company_name: &str) -> Option<&Entity> {
        self.entities(role)
            .iter()
            .find(|entity| entity.company_name == company_name)
    }

    /// Selectable company names in load order, without duplicates
    pub fn company_names(&self, role: Role) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.entities(role)
            .iter()
            .filter(|entity| seen.insert(entity.company_name.as_str()))
            .map(|entity| entity.company_name.clone())
            .collect()
    }
}

/// The selected company a query was resolved against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorSummary {
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Entity> for AnchorSummary {
    fn from(entity: &Entity) -> Self {
        Self {
            company_name: entity.company_name.clone(),
            city: entity.city.clone(),
            latitude: entity.latitude,
            longitude: entity.longitude,
        }
    }
}

/// Counterpart record annotated with its distance from the anchor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedEntity {
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub city: String,
    #[serde(rename = "productTerms")]
    pub product_terms: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "distanceMiles")]
    pub distance_miles: f64,
}

impl MatchedEntity {
    pub fn from_entity(entity: &Entity, distance_miles: f64) -> Self {
        Self {
            company_name: entity.company_name.clone(),
            city: entity.city.clone(),
            product_terms: entity.product_terms.clone(),
            latitude: entity.latitude,
            longitude: entity.longitude,
            distance_miles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_snapshot() -> MarketSnapshot {
        MarketSnapshot::new(
            1,
            vec![
                Entity::new("Corner Grocer", "Santa Cruz", 36.97, -122.03, "eggs, dairy"),
                Entity::new("Harbor Bistro", "Monterey", 36.60, -121.89, "fish"),
                Entity::new("Corner Grocer", "Aptos", 36.98, -121.90, "bread"),
            ],
            vec![Entity::new("Hilltop Farm", "Watsonville", 36.91, -121.76, "fresh eggs")],
        )
    }

    #[test]
    fn test_role_counterpart() {
        assert_eq!(Role::Buyer.counterpart(), Role::Producer);
        assert_eq!(Role::Producer.counterpart(), Role::Buyer);
        assert_eq!(Role::Producer.to_string(), "producer");
    }

    #[test]
    fn test_entity_derives_terms() {
        let entity = Entity::new("Grocer", "Salinas", 36.67, -121.65, " Eggs ,DAIRY,, ");
        assert_eq!(entity.terms().as_slice(), ["eggs", "dairy"]);
        assert_eq!(entity.search_text(), " eggs ,dairy,, ");
        assert!(!entity.is_wildcard());

        let wildcard = Entity::new("Anything Co", "Salinas", 36.67, -121.65, "ALL");
        assert!(wildcard.is_wildcard());

        for text in ["all,", "ALL, all", "all, eggs"] {
            let entity = Entity::new("Almost Co", "Salinas", 36.67, -121.65, text);
            assert!(!entity.is_wildcard(), "{:?} should not be a wildcard", text);
        }
    }

    #[test]
    fn test_find_first_match_wins() {
        let snapshot = create_snapshot();
        let found = snapshot.find(Role::Buyer, "Corner Grocer").unwrap();
        assert_eq!(found.city, "Santa Cruz");
        assert!(snapshot.find(Role::Producer, "Corner Grocer").is_none());
    }

    #[test]
    fn test_company_names_deduplicated_in_load_order() {
        let snapshot = create_snapshot();
        assert_eq!(
            snapshot.company_names(Role::Buyer),
            vec!["Corner Grocer".to_string(), "Harbor Bistro".to_string()]
        );
        assert_eq!(snapshot.company_names(Role::Producer), vec!["Hilltop Farm".to_string()]);
    }
}
