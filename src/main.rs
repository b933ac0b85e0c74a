use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use std::sync::Arc;
use tour_match::config::{LoggingSettings, Settings};
use tour_match::core::Recommender;
use tour_match::models::ScoringWeights;
use tour_match::routes::{self, AppState};
use tour_match::services::{AppwriteClient, AppwriteCollections, CacheManager};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging);

    info!("Starting tour package service...");

    let store = AppwriteClient::new(
        settings.appwrite.endpoint,
        settings.appwrite.api_key,
        settings.appwrite.project_id,
        settings.appwrite.database_id,
        AppwriteCollections {
            tour_packages: settings.collection.tour_packages,
        },
    )
    .map_err(|e| {
        error!("Failed to build Appwrite client: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    let store = Arc::new(store);

    info!("Appwrite client initialized");

    let cache_ttl = settings.cache.ttl_secs.unwrap_or(300);
    let l1_cache_size = settings.cache.l1_cache_size.unwrap_or(1000);

    let cache = match CacheManager::new(settings.cache.redis_url.as_deref(), l1_cache_size, cache_ttl).await {
        Ok(c) => {
            info!(
                "Cache manager initialized (L1: {} entries, TTL: {}s, Redis: {})",
                l1_cache_size,
                cache_ttl,
                c.has_redis()
            );
            c
        }
        Err(e) => {
            warn!("Failed to connect to Redis ({}), running with in-process cache only", e);
            CacheManager::in_memory(l1_cache_size, cache_ttl)
        }
    };
    let cache = Arc::new(cache);

    let weights = ScoringWeights::from(&settings.recommendation.weights);
    let recommender = Recommender::new(weights, settings.recommendation.min_score);

    info!(
        "Recommender initialized with weights: {:?}, cutoff: {}",
        weights,
        recommender.min_score()
    );

    let app_state = AppState {
        store,
        cache,
        recommender,
    };

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
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
