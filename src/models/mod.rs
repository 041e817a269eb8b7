// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{AnchorSummary, Entity, MarketSnapshot, MatchedEntity, Role};
pub use requests::{CompaniesQuery, ResolveMatchesRequest};
pub use responses::{CompaniesResponse, ErrorResponse, HealthResponse, ReloadResponse, ResolveMatchesResponse};
