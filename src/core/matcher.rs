use thiserror::Error;

use crate::core::{
    distance::haversine_distance,
    terms::{policy_for, resolve_active_terms, TermSet},
};
use crate::models::{AnchorSummary, MarketSnapshot, MatchedEntity, Role};

/// Default search radius, the same as the dashboard slider's starting value
pub const DEFAULT_MAX_DISTANCE_MILES: f64 = 100.0;

/// Errors that terminate a single match query
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("no {role} named '{company_name}'")]
    NotFound { role: Role, company_name: String },

    #[error("max distance must be a positive number of miles, got {0}")]
    InvalidBound(f64),
}

/// A single matching request
#[derive(Debug, Clone)]
pub struct MatchQuery {
    pub role: Role,
    pub company_name: String,
    pub keyword: Option<String>,
    pub max_distance_miles: Option<f64>,
}

impl MatchQuery {
    pub fn new(role: Role, company_name: impl Into<String>) -> Self {
        Self {
            role,
            company_name: company_name.into(),
            keyword: None,
            max_distance_miles: None,
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn within(mut self, max_distance_miles: f64) -> Self {
        self.max_distance_miles = Some(max_distance_miles);
        self
    }
}

/// Result of the matching process
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub anchor: AnchorSummary,
    pub active_terms: TermSet,
    pub max_distance_miles: f64,
    pub matches: Vec<MatchedEntity>,
    /// Counterparts that passed the text filter, before the distance filter
    pub total_candidates: usize,
}

/// Resolves a query against a snapshot of both registries
///
/// # Pipeline Stages
/// 1. Anchor lookup and active term resolution
/// 2. Role-specific text filter over the counterpart registry
/// 3. Distance filter
/// 4. Ranking by distance (stable)
#[derive(Debug, Clone, Copy)]
pub struct Matcher {
    default_max_distance_miles: f64,
}

impl Matcher {
    pub fn new(default_max_distance_miles: f64) -> Self {
        Self {
            default_max_distance_miles,
        }
    }

    pub fn default_max_distance_miles(&self) -> f64 {
        self.default_max_distance_miles
    }

    /// Find counterparts for the selected company
    ///
    /// # Arguments
    /// * `snapshot` - Both registries, read-only for the duration of the call
    /// * `query` - Role, selected company, optional keyword and bound
    ///
    /// # Returns
    /// Counterparts within the bound, nearest first. An empty list is a
    /// normal outcome.
    pub fn resolve(
        &self,
        snapshot: &MarketSnapshot,
        query: &MatchQuery,
    ) -> Result<MatchResult, MatchError> {
        let max_distance_miles = query
            .max_distance_miles
            .unwrap_or(self.default_max_distance_miles);

        // NaN fails this comparison too
        if !(max_distance_miles > 0.0) {
            return Err(MatchError::InvalidBound(max_distance_miles));
        }

        let anchor = snapshot
            .find(query.role, &query.company_name)
            .ok_or_else(|| MatchError::NotFound {
                role: query.role,
                company_name: query.company_name.clone(),
            })?;

        let active_terms = resolve_active_terms(anchor.terms(), query.keyword.as_deref());
        let is_candidate = policy_for(query.role);

        let mut total_candidates = 0;
        let mut matches: Vec<MatchedEntity> = snapshot
            .entities(query.role.counterpart())
            .iter()
            .filter(|counterpart| is_candidate(&active_terms, *counterpart))
            .filter_map(|counterpart| {
                total_candidates += 1;

                let distance_miles = haversine_distance(
                    anchor.latitude,
                    anchor.longitude,
                    counterpart.latitude,
                    counterpart.longitude,
                );

                (distance_miles <= max_distance_miles)
                    .then(|| MatchedEntity::from_entity(counterpart, distance_miles))
            })
            .collect();

        // sort_by is stable, so equal distances keep load order
        matches.sort_by(|a, b| {
            a.distance_miles
                .partial_cmp(&b.distance_miles)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::debug!(
            role = %query.role,
            company = %query.company_name,
            terms = ?active_terms.as_slice(),
            candidates = total_candidates,
            matches = matches.len(),
            "resolved matches"
        );

        Ok(MatchResult {
            anchor: AnchorSummary::from(anchor),
            active_terms,
            max_distance_miles,
            matches,
            total_candidates,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DISTANCE_MILES)
    }
}
