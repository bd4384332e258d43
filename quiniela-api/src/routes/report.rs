//! Report Route
//!
//! Streams the weekly summary PDF straight from memory; the formatter
//! never touches the filesystem.

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::{
    db::DbClient,
    error::{ApiError, ApiResult},
    report::render_report,
};

/// Shared application state for the report route.
#[derive(Clone)]
pub struct ReportState {
    pub db: DbClient,
}

impl ReportState {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }
}

/// GET /descargar_predicciones - Download the weekly summary PDF
#[utoipa::path(
    get,
    path = "/descargar_predicciones",
    tag = "Predicciones",
    responses(
        (status = 200, description = "PDF attachment, one line per prediction"),
        (status = 500, description = "Report generation failed", body = ApiError),
    )
)]
pub async fn download_predictions(
    State(state): State<Arc<ReportState>>,
) -> ApiResult<impl IntoResponse> {
    let predictions: Vec<_> = state
        .db
        .prediction_list()
        .await?
        .iter()
        .map(|row| row.to_prediction())
        .collect();

    let bytes =
        render_report(&predictions).map_err(|e| ApiError::formatter_error(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"predicciones.pdf\"",
            ),
        ],
        bytes,
    ))
}

/// Create the report route router.
pub fn create_router(db: DbClient) -> axum::Router {
    let state = Arc::new(ReportState::new(db));

    axum::Router::new()
        .route(
            "/descargar_predicciones",
            axum::routing::get(download_predictions),
        )
        .with_state(state)
}
