//! Admin Routes
//!
//! Weekly reset and the submission-lock toggle, both gated on the
//! shared admin secret carried in the request body (`clave`).

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{
    config::AdminConfig,
    db::DbClient,
    error::{ApiError, ApiResult},
    services::pool_service,
    types::{SetLockRequest, UpdateMatchesRequest},
};

/// Shared application state for admin routes.
#[derive(Clone)]
pub struct AdminState {
    pub db: DbClient,
    pub admin: AdminConfig,
}

impl AdminState {
    pub fn new(db: DbClient, admin: AdminConfig) -> Self {
        Self { db, admin }
    }
}

/// POST /actualizar_partidos - Publish the new week
///
/// Upserts the three matches, clears every prediction, and reopens the
/// submission window, all in one transaction.
#[utoipa::path(
    post,
    path = "/actualizar_partidos",
    tag = "Admin",
    request_body = UpdateMatchesRequest,
    responses(
        (status = 200, description = "Matches replaced, predictions cleared, lock opened", body = crate::types::MessageResponse),
        (status = 400, description = "Payload does not carry exactly 3 matches", body = ApiError),
        (status = 403, description = "Wrong admin secret", body = ApiError),
    )
)]
pub async fn update_matches(
    State(state): State<Arc<AdminState>>,
    Json(req): Json<UpdateMatchesRequest>,
) -> ApiResult<impl IntoResponse> {
    let response =
        pool_service::reset_week(&state.db, &state.admin, &req.clave, &req.partidos).await?;
    Ok(Json(response))
}

/// POST /bloquear_predicciones - Open or close the submission window
#[utoipa::path(
    post,
    path = "/bloquear_predicciones",
    tag = "Admin",
    request_body = SetLockRequest,
    responses(
        (status = 200, description = "Lock state updated", body = crate::types::MessageResponse),
        (status = 400, description = "Missing 'bloquear' flag", body = ApiError),
        (status = 403, description = "Wrong admin secret", body = ApiError),
    )
)]
pub async fn set_lock(
    State(state): State<Arc<AdminState>>,
    Json(req): Json<SetLockRequest>,
) -> ApiResult<impl IntoResponse> {
    let response =
        pool_service::set_lock(&state.db, &state.admin, &req.clave, req.bloquear).await?;
    Ok(Json(response))
}

/// Create the admin routes router.
pub fn create_router(db: DbClient, admin: AdminConfig) -> axum::Router {
    let state = Arc::new(AdminState::new(db, admin));

    axum::Router::new()
        .route(
            "/actualizar_partidos",
            axum::routing::post(update_matches),
        )
        .route(
            "/bloquear_predicciones",
            axum::routing::post(set_lock),
        )
        .with_state(state)
}
