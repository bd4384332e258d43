//! Match Registry Routes
//!
//! Read-only view of the three matches published for the week.

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{
    db::DbClient,
    error::{ApiError, ApiResult},
    types::{MatchDto, MatchListResponse},
};

/// Shared application state for match routes.
#[derive(Clone)]
pub struct MatchesState {
    pub db: DbClient,
}

impl MatchesState {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }
}

/// GET /obtener_partidos - List the current week's matches
#[utoipa::path(
    get,
    path = "/obtener_partidos",
    tag = "Partidos",
    responses(
        (status = 200, description = "Current match registry, ordered by id", body = MatchListResponse),
        (status = 500, description = "Database failure", body = ApiError),
    )
)]
pub async fn list_matches(State(state): State<Arc<MatchesState>>) -> ApiResult<impl IntoResponse> {
    let partidos: Vec<MatchDto> = state
        .db
        .match_list()
        .await?
        .into_iter()
        .map(MatchDto::from)
        .collect();

    Ok(Json(MatchListResponse { partidos }))
}

/// Create the match routes router.
pub fn create_router(db: DbClient) -> axum::Router {
    let state = Arc::new(MatchesState::new(db));

    axum::Router::new()
        .route("/obtener_partidos", axum::routing::get(list_matches))
        .with_state(state)
}
