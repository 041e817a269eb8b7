use serde::{Deserialize, Serialize};

use crate::core::MatchResult;
use crate::models::domain::{AnchorSummary, MatchedEntity, Role};
use crate::services::CacheStats;

/// Response for the resolve matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveMatchesResponse {
    pub role: Role,
    pub anchor: AnchorSummary,
    #[serde(rename = "activeTerms")]
    pub active_terms: Vec<String>,
    #[serde(rename = "maxDistanceMiles")]
    pub max_distance_miles: f64,
    pub matches: Vec<MatchedEntity>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
    #[serde(rename = "totalResults")]
    pub total_results: usize,
}

impl ResolveMatchesResponse {
    pub fn new(role: Role, result: MatchResult) -> Self {
        Self {
            role,
            anchor: result.anchor,
            active_terms: result.active_terms.as_slice().to_vec(),
            max_distance_miles: result.max_distance_miles,
            total_results: result.matches.len(),
            matches: result.matches,
            total_candidates: result.total_candidates,
        }
    }
}

/// Selectable company names for one role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompaniesResponse {
    pub role: Role,
    pub names: Vec<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub generation: u64,
    pub buyers: usize,
    pub producers: usize,
    pub cache: CacheStats,
}

/// Snapshot reload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub generation: u64,
    pub buyers: usize,
    pub producers: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
