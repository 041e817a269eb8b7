// Core algorithm exports
pub mod distance;
pub mod matcher;
pub mod terms;

pub use distance::{haversine_distance, EARTH_RADIUS_MILES};
pub use matcher::{MatchError, MatchQuery, MatchResult, Matcher, DEFAULT_MAX_DISTANCE_MILES};
pub use terms::{buyer_matches_supply, producer_matches_needs, resolve_active_terms, TermSet, WILDCARD_TERM};
