use actix_web::{web, HttpResponse, Responder};
use std::path::PathBuf;
use std::sync::Arc;
use validator::Validate;

use crate::config::DataSettings;
use crate::core::{MatchError, Matcher};
use crate::models::{
    CompaniesQuery, CompaniesResponse, ErrorResponse, HealthResponse, ReloadResponse,
    ResolveMatchesRequest, ResolveMatchesResponse,
};
use crate::services::{load_record_sets, CacheKey, CacheManager, SnapshotStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SnapshotStore>,
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
    pub data: DataSettings,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/companies", web::get().to(list_companies))
        .route("/matches/resolve", web::post().to(resolve_matches))
        .route("/snapshot/reload", web::post().to(reload_snapshot));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.store.current();

    let status = if snapshot.buyers.is_empty() || snapshot.producers.is_empty() {
        "degraded"
    } else {
        "healthy"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        generation: snapshot.generation,
        buyers: snapshot.buyers.len(),
        producers: snapshot.producers.len(),
        cache: state.cache.stats(),
    })
}

/// List selectable companies
///
/// GET /api/v1/companies?role=buyer|producer
async fn list_companies(
    state: web::Data<AppState>,
    query: web::Query<CompaniesQuery>,
) -> impl Responder {
    let snapshot = state.store.current();
    let names = snapshot.company_names(query.role);

    tracing::debug!("Listing {} {} names", names.len(), query.role);

    HttpResponse::Ok().json(CompaniesResponse {
        role: query.role,
        names,
    })
}

/// Resolve matches endpoint
///
/// POST /api/v1/matches/resolve
///
/// Request body:
/// ```json
/// {
///   "role": "buyer",
///   "companyName": "string",
///   "keyword": "string",
///   "maxDistanceMiles": 100
/// }
/// ```
async fn resolve_matches(
    state: web::Data<AppState>,
    req: web::Json<ResolveMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for resolve request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let query = req.to_query();
    let snapshot = state.store.current();
    let max_distance_miles = query
        .max_distance_miles
        .unwrap_or(state.matcher.default_max_distance_miles());
    let cache_key = CacheKey::matches(snapshot.generation, &query, max_distance_miles);

    if let Some(cached) = state.cache.get(&cache_key).await {
        tracing::debug!("Serving cached matches for {} {}", query.role, query.company_name);
        return HttpResponse::Ok().json(ResolveMatchesResponse::new(query.role, cached));
    }

    let result = match state.matcher.resolve(&snapshot, &query) {
        Ok(result) => result,
        Err(e @ MatchError::NotFound { .. }) => {
            tracing::info!("Resolve request for unknown company: {}", e);
            return HttpResponse::NotFound().json(ErrorResponse {
                error: "Company not found".to_string(),
                message: e.to_string(),
                status_code: 404,
            });
        }
        Err(e @ MatchError::InvalidBound(_)) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid max distance".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    state.cache.set(cache_key, result.clone()).await;

    tracing::info!(
        "Returning {} matches for {} {} within {} mi (from {} candidates)",
        result.matches.len(),
        query.role,
        query.company_name,
        result.max_distance_miles,
        result.total_candidates
    );

    HttpResponse::Ok().json(ResolveMatchesResponse::new(query.role, result))
}

/// Reload both registries from disk
///
/// POST /api/v1/snapshot/reload
///
/// On failure the previous snapshot stays live.
async fn reload_snapshot(state: web::Data<AppState>) -> impl Responder {
    let buyers_path: PathBuf = state.data.buyers_path.clone();
    let producers_path: PathBuf = state.data.producers_path.clone();

    let loaded = web::block(move || load_record_sets(&buyers_path, &producers_path)).await;

    let records = match loaded {
        Ok(Ok(records)) => records,
        Ok(Err(e)) => {
            tracing::error!("Snapshot reload failed: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to reload snapshot".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
        Err(e) => {
            tracing::error!("Snapshot reload task failed: {}", e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to reload snapshot".to_string(),
                message: e.to_string(),
                status_code: 500,
            });
        }
    };

    let snapshot = state.store.replace(records);
    state.cache.invalidate_all();

    HttpResponse::Ok().json(ReloadResponse {
        generation: snapshot.generation,
        buyers: snapshot.buyers.len(),
        producers: snapshot.producers.len(),
    })
}
