//! Pool entities: the weekly match and the participant prediction.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::MATCHES_PER_WEEK;

/// One of the three matches published for the week.
///
/// Identifiers are small positive integers, stable for the week and
/// reused across weeks (the reset workflow upserts by id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub team_one: String,
    pub team_two: String,
}

/// An ordered triple of predicted outcomes, one per match in registry
/// order.
///
/// Comparison is exact string equality per position - no case folding,
/// no whitespace normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast([String; MATCHES_PER_WEEK]);

impl Forecast {
    pub fn new(outcomes: [String; MATCHES_PER_WEEK]) -> Self {
        Self(outcomes)
    }

    /// Build a forecast from a client-supplied result list.
    ///
    /// Fails when fewer than three outcomes are given; extra entries
    /// beyond the third are ignored, matching the original wire
    /// behavior of only reading the first three positions.
    pub fn from_results(results: &[String]) -> Result<Self, DomainError> {
        if results.len() < MATCHES_PER_WEEK {
            return Err(DomainError::NotEnoughResults);
        }
        Ok(Self([
            results[0].clone(),
            results[1].clone(),
            results[2].clone(),
        ]))
    }

    pub fn outcomes(&self) -> &[String; MATCHES_PER_WEEK] {
        &self.0
    }

    /// Count positions where both forecasts predict the same outcome.
    pub fn matching_positions(&self, other: &Forecast) -> usize {
        self.0
            .iter()
            .zip(other.0.iter())
            .filter(|(a, b)| a == b)
            .count()
    }

    /// All three positions equal.
    pub fn is_exact_duplicate_of(&self, other: &Forecast) -> bool {
        self.matching_positions(other) == MATCHES_PER_WEEK
    }

    /// Exactly two of three positions equal. A full match is an exact
    /// duplicate, never a near duplicate.
    pub fn is_near_duplicate_of(&self, other: &Forecast) -> bool {
        self.matching_positions(other) == MATCHES_PER_WEEK - 1
    }
}

/// A participant's current prediction for the week.
///
/// The participant name is the natural key: at most one prediction per
/// name at any time, enforced by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub name: String,
    pub forecast: Forecast,
    /// Submission date, dd/mm/YYYY. Refreshed on every edit.
    pub date: String,
    /// Submission time, HH:MM. Refreshed on every edit.
    pub time: String,
    /// Successful edits so far; capped at [`crate::MAX_MODIFICATIONS`].
    pub modifications: i64,
}
