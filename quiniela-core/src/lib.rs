//! Quiniela Core - Domain Types and Admission Rules
//!
//! Pure domain layer for the weekly prediction pool: the match and
//! prediction entities, the outcome-triple comparison rules, and the
//! admission logic that decides whether a submission or modification
//! is accepted. No I/O and no async - the API crate owns persistence
//! and wires these rules into its transactions.

pub mod entities;
pub mod error;
pub mod rules;

pub use entities::{Forecast, Match, Prediction};
pub use error::DomainError;
pub use rules::{admit_modification, admit_submission, Admission};

use chrono::{DateTime, Local};

/// Number of matches published per week. The registry always holds
/// exactly this many, and every forecast carries one outcome per match.
pub const MATCHES_PER_WEEK: usize = 3;

/// Edits allowed per participant after the initial submission.
pub const MAX_MODIFICATIONS: i64 = 1;

/// Wire format for the submission date.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Wire format for the submission time.
pub const TIME_FORMAT: &str = "%H:%M";

/// Format a point in time as the (fecha, hora) pair stored on every
/// prediction.
pub fn stamp_at(at: DateTime<Local>) -> (String, String) {
    (
        at.format(DATE_FORMAT).to_string(),
        at.format(TIME_FORMAT).to_string(),
    )
}

/// Current (fecha, hora) pair, taken at call time.
pub fn submission_stamp() -> (String, String) {
    stamp_at(Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stamp_format() {
        let at = Local.with_ymd_and_hms(2026, 3, 7, 9, 5, 0).unwrap();
        let (fecha, hora) = stamp_at(at);
        assert_eq!(fecha, "07/03/2026");
        assert_eq!(hora, "09:05");
    }
}
