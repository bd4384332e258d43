//! Domain errors for the prediction rule engine.
//!
//! The display strings are the user-facing messages surfaced on the
//! wire, so they stay in the product language.

use thiserror::Error;

/// Reasons the rule engine refuses a submission or modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The submission window is closed.
    #[error("Las predicciones están bloqueadas")]
    Locked,

    /// The forecast carried fewer outcomes than there are matches.
    #[error("Se requieren 3 resultados")]
    NotEnoughResults,

    /// A prediction already exists under this participant name.
    #[error("Ya existe una predicción con ese nombre")]
    NameTaken,

    /// Another participant already holds an identical outcome triple.
    #[error("Ya existe una predicción idéntica de otro usuario")]
    DuplicateForecast,

    /// The participant spent their single allowed edit.
    #[error("Ya has alcanzado el máximo de modificaciones permitidas")]
    ModificationLimit,

    /// No prediction exists under this name to modify.
    #[error("Predicción no encontrada")]
    PredictionNotFound,
}
