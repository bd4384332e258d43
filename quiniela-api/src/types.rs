//! Wire types for the quiniela API.
//!
//! Field names are the public contract's Spanish names and serialize
//! verbatim. Requests use `#[serde(default)]` on optional-at-the-wire
//! fields so incomplete payloads reach the handlers and fail with the
//! contract's error codes instead of a generic rejection.

use quiniela_core::Match;
use serde::{Deserialize, Serialize};

use crate::db::PredictionRow;

// ============================================================================
// MATCHES
// ============================================================================

/// One published match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MatchDto {
    pub id: i64,
    pub equipo1: String,
    pub equipo2: String,
}

impl From<Match> for MatchDto {
    fn from(m: Match) -> Self {
        Self {
            id: m.id,
            equipo1: m.team_one,
            equipo2: m.team_two,
        }
    }
}

/// Response for `GET /obtener_partidos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MatchListResponse {
    pub partidos: Vec<MatchDto>,
}

// ============================================================================
// PREDICTIONS
// ============================================================================

/// One stored prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PredictionDto {
    pub id: i64,
    pub nombre: String,
    /// Outcome triple in match-registry order.
    pub resultados: Vec<String>,
    pub fecha: String,
    pub hora: String,
    pub modificaciones: i64,
}

impl From<PredictionRow> for PredictionDto {
    fn from(row: PredictionRow) -> Self {
        Self {
            id: row.id,
            nombre: row.nombre,
            resultados: vec![row.resultado1, row.resultado2, row.resultado3],
            fecha: row.fecha,
            hora: row.hora,
            modificaciones: row.modificaciones,
        }
    }
}

/// Response for `GET /predicciones`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PredictionListResponse {
    pub predicciones: Vec<PredictionDto>,
}

/// Body of `POST /agregar_prediccion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SubmitPredictionRequest {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub resultados: Vec<String>,
}

/// Body of `PUT /modificar_prediccion`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ModifyPredictionRequest {
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub resultados: Vec<String>,
}

// ============================================================================
// ADMIN
// ============================================================================

/// One match entry in the weekly update, upserted by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MatchUpsert {
    pub id: i64,
    pub equipo1: String,
    pub equipo2: String,
}

/// Body of `POST /actualizar_partidos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateMatchesRequest {
    #[serde(default)]
    pub clave: String,
    #[serde(default)]
    pub partidos: Vec<MatchUpsert>,
}

/// Body of `POST /bloquear_predicciones`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SetLockRequest {
    #[serde(default)]
    pub clave: String,
    /// Required at the wire; `None` is rejected with the contract's
    /// explicit message.
    #[serde(default)]
    pub bloquear: Option<bool>,
}

// ============================================================================
// SHARED
// ============================================================================

/// Success envelope for the mutating endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub mensaje: String,
    /// Near-duplicate advisory; present only when the accepted forecast
    /// shares exactly two of three outcomes with another participant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl MessageResponse {
    pub fn new(mensaje: impl Into<String>) -> Self {
        Self {
            mensaje: mensaje.into(),
            warning: None,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }
}
