use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{RecommendError, Recommender};
use crate::models::{
    CustomizePackageRequest, CustomizePackageResponse, ErrorResponse, HealthResponse, MessageResponse,
    PackageRequest, PackageSummary, PlaceRecommendation, TourPackage,
};
use crate::services::{AppwriteClient, AppwriteError, CacheKey, CacheManager};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AppwriteClient>,
    pub cache: Arc<CacheManager>,
    pub recommender: Recommender,
}

/// Configure all package-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .service(
            web::resource("/packages")
                .route(web::get().to(list_packages))
                .route(web::post().to(create_package)),
        )
        .service(
            web::resource("/packages/{id}")
                .route(web::get().to(get_package))
                .route(web::put().to(update_package))
                .route(web::delete().to(delete_package)),
        )
        .route("/packages/{id}/customize-v2", web::post().to(customize_package));
}

fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

fn store_error_response(err: AppwriteError, action: &str) -> HttpResponse {
    match err {
        AppwriteError::NotFound(msg) => error_response(StatusCode::NOT_FOUND, "Package not found", msg),
        other => {
            tracing::error!("Failed to {}: {}", action, other);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Failed to {}", action),
                other.to_string(),
            )
        }
    }
}

fn duplicate_package_response() -> HttpResponse {
    error_response(
        StatusCode::BAD_REQUEST,
        "Duplicate package",
        "A package with this ID already exists",
    )
}

/// Load a package through the cache
async fn load_package(state: &AppState, id: &str) -> Result<TourPackage, AppwriteError> {
    let key = CacheKey::package(id);
    if let Ok(package) = state.cache.get::<TourPackage>(&key).await {
        return Ok(package);
    }

    let package = state.store.get_package(id).await?;
    if let Err(e) = state.cache.set(&key, &package).await {
        tracing::warn!("Failed to cache package {}: {}", id, e);
    }
    Ok(package)
}

async fn invalidate(state: &AppState, id: Option<&str>) {
    let mut keys = vec![CacheKey::package_list()];
    if let Some(id) = id {
        keys.push(CacheKey::package(id));
    }
    for key in keys {
        if let Err(e) = state.cache.delete(&key).await {
            tracing::warn!("Failed to invalidate cache key {}: {}", key, e);
        }
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.cache.has_redis() { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// List packages
///
/// GET /api/packages
async fn list_packages(state: web::Data<AppState>) -> impl Responder {
    let key = CacheKey::package_list();
    if let Ok(packages) = state.cache.get::<Vec<TourPackage>>(&key).await {
        return HttpResponse::Ok().json(packages);
    }

    match state.store.list_packages().await {
        Ok(packages) => {
            if let Err(e) = state.cache.set(&key, &packages).await {
                tracing::warn!("Failed to cache package list: {}", e);
            }
            HttpResponse::Ok().json(packages)
        }
        Err(e) => store_error_response(e, "list packages"),
    }
}

/// Get a package
///
/// GET /api/packages/{id}
async fn get_package(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    match load_package(&state, &path).await {
        Ok(package) => HttpResponse::Ok().json(package),
        Err(e) => store_error_response(e, "fetch package"),
    }
}

/// Create a package
///
/// POST /api/packages
async fn create_package(state: web::Data<AppState>, req: web::Json<PackageRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for create_package request: {}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    match state.store.find_by_package_id(req.package_id.trim()).await {
        Ok(Some(existing)) => {
            tracing::info!("Package id {} already used by {}", existing.package_id, existing.id);
            return duplicate_package_response();
        }
        Ok(None) => {}
        Err(e) => return store_error_response(e, "check package id"),
    }

    let package = req.into_inner().into_package(String::new());

    match state.store.create_package(&package).await {
        Ok(created) => {
            tracing::info!("Created package {} with {} places", created.id, created.places.len());
            invalidate(&state, None).await;
            HttpResponse::Created().json(created)
        }
        Err(e) => store_error_response(e, "create package"),
    }
}

/// Replace a package
///
/// PUT /api/packages/{id}
async fn update_package(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<PackageRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for update_package request: {}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let id = path.into_inner();

    match state.store.find_by_package_id(req.package_id.trim()).await {
        Ok(Some(existing)) if existing.id != id => {
            tracing::info!("Package id {} already used by {}", existing.package_id, existing.id);
            return duplicate_package_response();
        }
        Ok(_) => {}
        Err(e) => return store_error_response(e, "check package id"),
    }

    let package = req.into_inner().into_package(id.clone());

    match state.store.update_package(&id, &package).await {
        Ok(updated) => {
            tracing::info!("Updated package {}", id);
            invalidate(&state, Some(&id)).await;
            HttpResponse::Ok().json(updated)
        }
        Err(e) => store_error_response(e, "update package"),
    }
}

/// Delete a package
///
/// DELETE /api/packages/{id}
async fn delete_package(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match state.store.delete_package(&id).await {
        Ok(()) => {
            tracing::info!("Deleted package {}", id);
            invalidate(&state, Some(&id)).await;
            HttpResponse::Ok().json(MessageResponse {
                message: "Package deleted successfully".to_string(),
            })
        }
        Err(e) => store_error_response(e, "delete package"),
    }
}

/// Personalized place recommendations for a package
///
/// POST /api/packages/{id}/customize-v2
///
/// Request body:
/// ```json
/// {
///   "age": 25,
///   "gender": "female",
///   "placeType": ["Beach"],
///   "hobby": ["Surfing"],
///   "climate": "Tropical",
///   "diseases": [],
///   "physicalDisorders": [],
///   "minScore": 10.0
/// }
/// ```
async fn customize_package(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<CustomizePackageRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let id = path.into_inner();
    let package = match load_package(&state, &id).await {
        Ok(package) => package,
        Err(e) => return store_error_response(e, "fetch package"),
    };

    let result = match state.recommender.recommend(&req.profile, &package.places, req.min_score) {
        Ok(result) => result,
        Err(RecommendError::InvalidProfile(msg)) => {
            tracing::info!("Rejected profile for package {}: {}", id, msg);
            return error_response(StatusCode::BAD_REQUEST, "Valid age is required", msg);
        }
    };

    tracing::info!(
        "Returning {} recommendations for package {} (from {} places, {} excluded)",
        result.places.len(),
        id,
        result.total_candidates,
        result.excluded.len()
    );

    HttpResponse::Ok().json(CustomizePackageResponse {
        package: PackageSummary {
            id: package.id,
            name: package.name,
        },
        user_preferences: result.profile,
        recommendations: result.places.into_iter().map(PlaceRecommendation::from).collect(),
        algorithm: "heuristic".to_string(),
        model_version: "1.0".to_string(),
    })
}
