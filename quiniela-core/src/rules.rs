//! Prediction admission rules.
//!
//! These functions decide whether a submit or modify operation is
//! allowed, given the submission lock, the raw result list from the
//! wire, and the predictions currently in the store. They are pure:
//! the caller loads the rows, asks for a verdict, and persists the
//! result inside the same transaction so the scan-then-write sequence
//! stays atomic.
//!
//! Check order is part of the contract: the lock is consulted first,
//! then the payload shape, then (for edits) existence and the edit
//! allowance, then the duplicate scan.
//!
//! "Other" participants never include the acting name - a participant
//! is never blocked or warned by their own prior forecast.

use crate::entities::{Forecast, Prediction};
use crate::error::DomainError;
use crate::MAX_MODIFICATIONS;

/// Warning attached to an accepted submission that shares exactly two
/// of three outcomes with another participant.
pub const NEAR_DUPLICATE_WARNING_SUBMIT: &str =
    "Atención: Tu predicción coincide en 2 de 3 resultados con otra predicción.";

/// Warning attached to an accepted modification, same rule.
pub const NEAR_DUPLICATE_WARNING_MODIFY: &str =
    "Atención: Tu nueva predicción coincide en 2 de 3 resultados con otra predicción.";

/// A successful admission verdict: the parsed forecast to persist and
/// whether the near-duplicate advisory fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub forecast: Forecast,
    /// Some other participant's current forecast matches the candidate
    /// in exactly two of three positions. Advisory only.
    pub near_duplicate: bool,
}

/// Scan the other participants' rows for exact and near duplicates of
/// the candidate. Stops at the first exact hit; the near flag is taken
/// from the first qualifying row in stored order.
fn scan_others(name: &str, candidate: &Forecast, existing: &[Prediction]) -> (bool, bool) {
    let mut near = false;
    for other in existing.iter().filter(|p| p.name != name) {
        if candidate.is_exact_duplicate_of(&other.forecast) {
            return (true, near);
        }
        if !near && candidate.is_near_duplicate_of(&other.forecast) {
            near = true;
        }
    }
    (false, near)
}

/// Decide whether a first-time submission is admitted.
///
/// `existing` is the full prediction store snapshot, own row included
/// if present. Checks, in order: the submission lock, the payload
/// shape, the one-row-per-name invariant, and the exact-duplicate rule
/// against other names.
pub fn admit_submission(
    locked: bool,
    name: &str,
    results: &[String],
    existing: &[Prediction],
) -> Result<Admission, DomainError> {
    if locked {
        return Err(DomainError::Locked);
    }
    let candidate = Forecast::from_results(results)?;
    if existing.iter().any(|p| p.name == name) {
        return Err(DomainError::NameTaken);
    }
    match scan_others(name, &candidate, existing) {
        (true, _) => Err(DomainError::DuplicateForecast),
        (false, near) => Ok(Admission {
            forecast: candidate,
            near_duplicate: near,
        }),
    }
}

/// Decide whether an edit to an existing prediction is admitted.
///
/// Checks, in order: the submission lock, the payload shape, that a
/// row exists for the name, the modification limit, and the
/// exact-duplicate rule against other names. The existing row itself
/// never conflicts with the candidate.
pub fn admit_modification(
    locked: bool,
    name: &str,
    results: &[String],
    existing: &[Prediction],
) -> Result<Admission, DomainError> {
    if locked {
        return Err(DomainError::Locked);
    }
    let candidate = Forecast::from_results(results)?;
    let own = existing
        .iter()
        .find(|p| p.name == name)
        .ok_or(DomainError::PredictionNotFound)?;
    if own.modifications >= MAX_MODIFICATIONS {
        return Err(DomainError::ModificationLimit);
    }
    match scan_others(name, &candidate, existing) {
        (true, _) => Err(DomainError::DuplicateForecast),
        (false, near) => Ok(Admission {
            forecast: candidate,
            near_duplicate: near,
        }),
    }
}
