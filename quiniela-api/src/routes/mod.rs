//! REST API Routes Module
//!
//! Route handlers organized by surface:
//! - Match registry reads
//! - Prediction listing, submission, and modification
//! - Admin week reset and lock toggle
//! - PDF report download
//! - Health checks
//! - CORS support for browser-based clients

pub mod admin;
pub mod health;
pub mod matches;
pub mod predictions;
pub mod report;

use axum::{
    http::{header, HeaderValue, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::config::{AdminConfig, ApiConfig};
use crate::db::DbClient;
use crate::openapi::ApiDoc;

// Re-export route creation functions for convenience
pub use admin::create_router as admin_router;
pub use health::create_router as health_router;
pub use matches::create_router as matches_router;
pub use predictions::create_router as predictions_router;
pub use report::create_router as report_router;

// ============================================================================
// OPENAPI ENDPOINT
// ============================================================================

/// Handler for /openapi.json endpoint.
async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ============================================================================
// CORS LAYER
// ============================================================================

/// Build the CORS layer from ApiConfig.
///
/// In development mode (empty origins), allows all origins.
/// In production mode, only allows configured origins.
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if config.cors_origins.is_empty() {
        // Development mode: allow all origins
        tracing::info!("CORS: Development mode - allowing all origins");
        cors.allow_origin(Any)
    } else {
        tracing::info!(
            "CORS: Production mode - allowing origins: {:?}",
            config.cors_origins
        );
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(origins)
    }
}

// ============================================================================
// ROUTER ASSEMBLY
// ============================================================================

/// Create the complete API router.
///
/// The public surface keeps the original's top-level paths:
/// - GET  /obtener_partidos
/// - GET  /predicciones
/// - POST /agregar_prediccion
/// - PUT  /modificar_prediccion
/// - POST /actualizar_partidos
/// - POST /bloquear_predicciones
/// - GET  /descargar_predicciones
///
/// Plus health checks under /health/* and the OpenAPI spec at
/// /openapi.json.
pub fn create_api_router(
    db: DbClient,
    admin_config: AdminConfig,
    api_config: &ApiConfig,
) -> Router {
    let cors = build_cors_layer(api_config);

    Router::new()
        .merge(matches::create_router(db.clone()))
        .merge(predictions::create_router(db.clone()))
        .merge(admin::create_router(db.clone(), admin_config))
        .merge(report::create_router(db.clone()))
        .merge(health::create_router(db))
        .route("/openapi.json", get(openapi_json))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
