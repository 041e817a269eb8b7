use crate::models::{Entity, Role};

/// Reserved token meaning "matches any counterpart"
pub const WILDCARD_TERM: &str = "all";

/// Normalized product terms: lower-cased, trimmed, non-empty, de-duplicated,
/// in the order they first appear
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TermSet(Vec<String>);

impl TermSet {
    /// Split comma-separated product text into terms
    pub fn parse(raw: &str) -> Self {
        let mut terms: Vec<String> = Vec::new();
        for term in raw.split(',').map(|t| t.trim().to_lowercase()) {
            if !term.is_empty() && !terms.contains(&term) {
                terms.push(term);
            }
        }
        Self(terms)
    }

    /// A single literal term; commas are kept as part of the term
    pub fn literal(raw: &str) -> Self {
        let term = raw.trim().to_lowercase();
        if term.is_empty() {
            Self::default()
        } else {
            Self(vec![term])
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains_wildcard(&self) -> bool {
        self.iter().any(|term| term == WILDCARD_TERM)
    }

    /// True when any term occurs as a substring of `text` (already lower-cased)
    pub fn any_within(&self, text: &str) -> bool {
        self.iter().any(|term| text.contains(term))
    }
}

/// Terms a query matches with: the keyword override when it is non-empty
/// after trimming, otherwise the anchor's own terms
pub fn resolve_active_terms(own: &TermSet, keyword: Option<&str>) -> TermSet {
    match keyword.map(TermSet::literal) {
        Some(override_terms) if !override_terms.is_empty() => override_terms,
        _ => own.clone(),
    }
}

/// Candidate predicate used when a buyer is looking for producers
///
/// An empty or wildcard need set admits every producer.
#[inline]
pub fn producer_matches_needs(needs: &TermSet, producer: &Entity) -> bool {
    if needs.is_empty() || needs.contains_wildcard() {
        return true;
    }

    producer.is_wildcard() || needs.any_within(producer.search_text())
}

/// Candidate predicate used when a producer is looking for buyers
///
/// An empty supply set admits wildcard buyers only.
#[inline]
pub fn buyer_matches_supply(supply: &TermSet, buyer: &Entity) -> bool {
    if buyer.is_wildcard() {
        return true;
    }

    !supply.is_empty() && supply.any_within(buyer.search_text())
}

/// Candidate predicate for a query anchored on `anchor_role`
pub fn policy_for(anchor_role: Role) -> fn(&TermSet, &Entity) -> bool {
    match anchor_role {
        Role::Buyer => producer_matches_needs,
        Role::Producer => buyer_matches_supply,
    }
}
