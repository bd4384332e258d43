//! Error Types for the Quiniela API
//!
//! This module defines error handling for the API layer:
//! - ApiError struct for structured error responses
//! - ErrorCode enum for categorizing errors
//! - IntoResponse implementation for Axum HTTP responses
//!
//! All errors are serialized as JSON with the HTTP status the public
//! contract fixes for them: a wrong admin secret and a closed
//! submission window are 403, an exact duplicate forecast is 400, a
//! taken participant name is 409.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use quiniela_core::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ERROR CODE ENUM
// ============================================================================

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Admin secret missing or wrong
    Unauthorized,

    /// The submission window is closed
    Locked,

    /// Request contains invalid input data
    InvalidInput,

    /// Required field is missing from request
    MissingField,

    /// No prediction exists for the given name
    NotFound,

    /// Outcome triple collides exactly with another participant's
    DuplicateConflict,

    /// A prediction already exists under this participant name
    AlreadyExists,

    /// The participant already spent their single allowed edit
    ModificationLimitExceeded,

    /// Report generation failed
    FormatterError,

    /// Database operation failed
    DatabaseError,

    /// Internal server error
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            // The original contract returns 403 for a bad secret, the
            // closed window, and the exhausted edit allowance alike.
            ErrorCode::Unauthorized
            | ErrorCode::Locked
            | ErrorCode::ModificationLimitExceeded => StatusCode::FORBIDDEN,

            ErrorCode::InvalidInput
            | ErrorCode::MissingField
            | ErrorCode::DuplicateConflict => StatusCode::BAD_REQUEST,

            ErrorCode::NotFound => StatusCode::NOT_FOUND,

            ErrorCode::AlreadyExists => StatusCode::CONFLICT,

            ErrorCode::FormatterError
            | ErrorCode::DatabaseError
            | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a default message for this error code.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorCode::Unauthorized => "Clave incorrecta",
            ErrorCode::Locked => "Las predicciones están bloqueadas",
            ErrorCode::InvalidInput => "Invalid input data",
            ErrorCode::MissingField => "Required field is missing",
            ErrorCode::NotFound => "Predicción no encontrada",
            ErrorCode::DuplicateConflict => "Ya existe una predicción idéntica de otro usuario",
            ErrorCode::AlreadyExists => "Ya existe una predicción con ese nombre",
            ErrorCode::ModificationLimitExceeded => {
                "Ya has alcanzado el máximo de modificaciones permitidas"
            }
            ErrorCode::FormatterError => "Report generation failed",
            ErrorCode::DatabaseError => "Database operation failed",
            ErrorCode::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ============================================================================
// API ERROR STRUCT
// ============================================================================

/// Structured error response for API operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    /// Error code categorizing the error
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Create a new API error with the given code and message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Create a new API error with the given code, using the default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self {
            code,
            message: code.default_message().to_string(),
            details: None,
        }
    }

    /// Add additional details to the error.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }

    // ========================================================================
    // Convenience constructors
    // ========================================================================

    /// Create an Unauthorized error (bad admin secret).
    pub fn unauthorized() -> Self {
        Self::from_code(ErrorCode::Unauthorized)
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Create a MissingField error.
    pub fn missing_field(field: &str) -> Self {
        Self::new(
            ErrorCode::MissingField,
            format!("Required field '{}' is missing", field),
        )
    }

    /// Create a NotFound error with a custom message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a FormatterError.
    pub fn formatter_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FormatterError, message)
    }

    /// Create a DatabaseError.
    pub fn database_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Create an InternalError.
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// AXUM INTEGRATION
// ============================================================================

/// Implement IntoResponse for ApiError to enable automatic error
/// handling in Axum handlers returning `ApiResult<T>`.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self);
        (status, body).into_response()
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

/// Map rule-engine verdicts onto wire errors. The display string of the
/// domain error is the product message and goes out verbatim.
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let code = match err {
            DomainError::Locked => ErrorCode::Locked,
            DomainError::NotEnoughResults => ErrorCode::InvalidInput,
            DomainError::NameTaken => ErrorCode::AlreadyExists,
            DomainError::DuplicateForecast => ErrorCode::DuplicateConflict,
            DomainError::ModificationLimit => ErrorCode::ModificationLimitExceeded,
            DomainError::PredictionNotFound => ErrorCode::NotFound,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Convert from sqlx::Error to ApiError.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        // Log the full error for debugging
        tracing::error!("Database error: {:?}", err);

        // Return a generic database error to avoid leaking internal details
        ApiError::database_error("Database operation failed")
    }
}

/// Convert from serde_json::Error to ApiError.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON serialization error: {:?}", err);
        ApiError::invalid_input(format!("Invalid JSON: {}", err))
    }
}

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_status_mapping() {
        assert_eq!(ErrorCode::Unauthorized.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ErrorCode::Locked.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ErrorCode::ModificationLimitExceeded.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ErrorCode::InvalidInput.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::DuplicateConflict.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::AlreadyExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::DatabaseError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_domain_error_mapping() {
        let err: ApiError = DomainError::Locked.into();
        assert_eq!(err.code, ErrorCode::Locked);
        assert_eq!(err.message, "Las predicciones están bloqueadas");

        let err: ApiError = DomainError::DuplicateForecast.into();
        assert_eq!(err.code, ErrorCode::DuplicateConflict);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: ApiError = DomainError::ModificationLimit.into();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let err: ApiError = DomainError::PredictionNotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_serialization() -> Result<(), serde_json::Error> {
        let err = ApiError::unauthorized();
        let json = serde_json::to_string(&err)?;

        assert!(json.contains("UNAUTHORIZED"));
        assert!(json.contains("Clave incorrecta"));

        let deserialized: ApiError = serde_json::from_str(&json)?;
        assert_eq!(deserialized, err);
        Ok(())
    }

    #[test]
    fn test_details_skipped_when_absent() {
        let err = ApiError::invalid_input("bad payload");
        let json = serde_json::to_string(&err).unwrap();
        assert!(!json.contains("details"));

        let with = err.with_details(serde_json::json!({"field": "resultados"}));
        let json = serde_json::to_string(&with).unwrap();
        assert!(json.contains("details"));
    }
}
