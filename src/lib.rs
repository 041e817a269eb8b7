//! Market Match - matching service for a local B2B food marketplace
//!
//! This library pairs buyers with the producers that supply what they need
//! (and producers with the buyers that need what they grow), filtered by
//! great-circle distance and ranked nearest first.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{haversine_distance, MatchError, MatchQuery, MatchResult, Matcher, TermSet};
pub use models::{Entity, MarketSnapshot, MatchedEntity, Role};
