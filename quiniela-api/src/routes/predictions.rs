//! Prediction Routes
//!
//! Listing plus the two rule-engine operations: first-time submission
//! and the single allowed edit. The handlers validate the payload
//! shape and delegate the admission decision and the write to the
//! prediction service, which runs them in one transaction.

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::{
    db::DbClient,
    error::{ApiError, ApiResult},
    services::prediction_service,
    types::{
        ModifyPredictionRequest, PredictionDto, PredictionListResponse, SubmitPredictionRequest,
    },
    validation::ValidateNonEmpty,
};

/// Shared application state for prediction routes.
#[derive(Clone)]
pub struct PredictionsState {
    pub db: DbClient,
}

impl PredictionsState {
    pub fn new(db: DbClient) -> Self {
        Self { db }
    }
}

/// GET /predicciones - List all predictions, most recent first
#[utoipa::path(
    get,
    path = "/predicciones",
    tag = "Predicciones",
    responses(
        (status = 200, description = "All predictions, fecha descending", body = PredictionListResponse),
        (status = 500, description = "Database failure", body = ApiError),
    )
)]
pub async fn list_predictions(
    State(state): State<Arc<PredictionsState>>,
) -> ApiResult<impl IntoResponse> {
    let predicciones: Vec<PredictionDto> = state
        .db
        .prediction_list()
        .await?
        .into_iter()
        .map(PredictionDto::from)
        .collect();

    Ok(Json(PredictionListResponse { predicciones }))
}

/// POST /agregar_prediccion - Submit a first-time prediction
#[utoipa::path(
    post,
    path = "/agregar_prediccion",
    tag = "Predicciones",
    request_body = SubmitPredictionRequest,
    responses(
        (status = 200, description = "Prediction stored; warning present on a 2-of-3 match", body = crate::types::MessageResponse),
        (status = 400, description = "Fewer than 3 results, or exact duplicate of another participant", body = ApiError),
        (status = 403, description = "Submissions are locked", body = ApiError),
        (status = 409, description = "Name already holds a prediction", body = ApiError),
    )
)]
pub async fn submit_prediction(
    State(state): State<Arc<PredictionsState>>,
    Json(req): Json<SubmitPredictionRequest>,
) -> ApiResult<impl IntoResponse> {
    req.nombre.validate_non_empty("nombre")?;

    let response =
        prediction_service::submit_prediction(&state.db, &req.nombre, &req.resultados).await?;
    Ok(Json(response))
}

/// PUT /modificar_prediccion - Apply the participant's single allowed edit
#[utoipa::path(
    put,
    path = "/modificar_prediccion",
    tag = "Predicciones",
    request_body = ModifyPredictionRequest,
    responses(
        (status = 200, description = "Prediction updated; warning present on a 2-of-3 match", body = crate::types::MessageResponse),
        (status = 400, description = "Fewer than 3 results, or exact duplicate of another participant", body = ApiError),
        (status = 403, description = "Submissions locked, or modification limit reached", body = ApiError),
        (status = 404, description = "No prediction under this name", body = ApiError),
    )
)]
pub async fn modify_prediction(
    State(state): State<Arc<PredictionsState>>,
    Json(req): Json<ModifyPredictionRequest>,
) -> ApiResult<impl IntoResponse> {
    req.nombre.validate_non_empty("nombre")?;

    let response =
        prediction_service::modify_prediction(&state.db, &req.nombre, &req.resultados).await?;
    Ok(Json(response))
}

/// Create the prediction routes router.
pub fn create_router(db: DbClient) -> axum::Router {
    let state = Arc::new(PredictionsState::new(db));

    axum::Router::new()
        .route("/predicciones", axum::routing::get(list_predictions))
        .route(
            "/agregar_prediccion",
            axum::routing::post(submit_prediction),
        )
        .route(
            "/modificar_prediccion",
            axum::routing::put(modify_prediction),
        )
        .with_state(state)
}
