use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use market_match::config::Settings;
use market_match::core::Matcher;
use market_match::routes::{self, AppState};
use market_match::services::{load_record_sets, CacheManager, SnapshotStore};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
        }
    };

    // Initialize logging; LOG_LEVEL / LOG_FORMAT win over the config file
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    match log_format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "compact" => subscriber.compact().init(),
        _ => subscriber.init(),
    }

    info!("Starting market matching service...");

    let records = load_record_sets(&settings.data.buyers_path, &settings.data.producers_path)
        .map_err(|e| {
            error!("Failed to load registries: {}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
        })?;

    let store = Arc::new(SnapshotStore::new(records));

    let cache = if settings.cache.enabled {
        info!(
            "Result cache enabled (L1: {} entries, TTL: {}s)",
            settings.cache.l1_cache_size, settings.cache.ttl_secs
        );
        Arc::new(CacheManager::new(settings.cache.l1_cache_size, settings.cache.ttl_secs))
    } else {
        info!("Result cache disabled");
        Arc::new(CacheManager::disabled())
    };

    let matcher = Matcher::new(settings.matching.default_max_distance_miles);

    info!("Matcher initialized with default radius {} mi", matcher.default_max_distance_miles());

    // Build application state
    let app_state = AppState {
        store,
        cache,
        matcher,
        data: settings.data.clone(),
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
