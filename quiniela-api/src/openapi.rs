//! OpenAPI Specification for the Quiniela API
//!
//! Generated with utoipa from the route annotations and wire types,
//! served at /openapi.json.

use utoipa::OpenApi;

use crate::error::{ApiError, ErrorCode};
use crate::routes::{admin, health, matches, predictions, report};
use crate::types::{
    MatchDto, MatchListResponse, MatchUpsert, MessageResponse, ModifyPredictionRequest,
    PredictionDto, PredictionListResponse, SetLockRequest, SubmitPredictionRequest,
    UpdateMatchesRequest,
};

/// OpenAPI document for the Quiniela API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quiniela API",
        version = "0.1.0",
        description = "Weekly sports-prediction pool: match registry, prediction \
                       submission with duplicate detection and a single-edit \
                       allowance, and a downloadable weekly summary",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
    ),
    servers(
        (url = "http://localhost:3000", description = "Local Development")
    ),
    tags(
        (name = "Partidos", description = "The three matches published for the week"),
        (name = "Predicciones", description = "Participant predictions and the weekly report"),
        (name = "Admin", description = "Week reset and submission-lock control"),
        (name = "Health", description = "Liveness and readiness checks"),
    ),
    paths(
        matches::list_matches,
        predictions::list_predictions,
        predictions::submit_prediction,
        predictions::modify_prediction,
        admin::update_matches,
        admin::set_lock,
        report::download_predictions,
        health::ping,
        health::liveness,
        health::readiness,
    ),
    components(schemas(
        ApiError,
        ErrorCode,
        MatchDto,
        MatchListResponse,
        MatchUpsert,
        MessageResponse,
        ModifyPredictionRequest,
        PredictionDto,
        PredictionListResponse,
        SetLockRequest,
        SubmitPredictionRequest,
        UpdateMatchesRequest,
        health::HealthResponse,
        health::HealthStatus,
        health::HealthDetails,
        health::ComponentHealth,
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_builds() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).expect("spec serializes");
        assert!(json.contains("/agregar_prediccion"));
        assert!(json.contains("/actualizar_partidos"));
        assert!(json.contains("/descargar_predicciones"));
    }
}
