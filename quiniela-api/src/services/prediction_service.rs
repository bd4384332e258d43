//! Prediction Service
//!
//! Runs the submit and modify operations. Each call is one transaction:
//! read the lock flag, snapshot the store, ask the rule engine for a
//! verdict, persist. Holding the scan and the write in a single
//! transaction keeps two concurrent submissions from both passing the
//! duplicate check and both committing identical triples.

use quiniela_core::rules::{NEAR_DUPLICATE_WARNING_MODIFY, NEAR_DUPLICATE_WARNING_SUBMIT};
use quiniela_core::{admit_modification, admit_submission, submission_stamp, Prediction};

use crate::db::{self, DbClient};
use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::types::MessageResponse;

/// Submit a first-time prediction for `name`.
pub async fn submit_prediction(
    db: &DbClient,
    name: &str,
    results: &[String],
) -> ApiResult<MessageResponse> {
    let mut tx = db.pool().begin().await?;
    let locked = db::load_locked(&mut *tx).await?;
    let store = snapshot(&mut tx).await?;

    let verdict = admit_submission(locked, name, results, &store)?;

    let (fecha, hora) = submission_stamp();
    let outcomes = verdict.forecast.outcomes();
    let inserted = sqlx::query(
        "INSERT INTO prediccion
             (nombre, resultado1, resultado2, resultado3, fecha, hora, modificaciones)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
    )
    .bind(name)
    .bind(&outcomes[0])
    .bind(&outcomes[1])
    .bind(&outcomes[2])
    .bind(&fecha)
    .bind(&hora)
    .execute(&mut *tx)
    .await;

    match inserted {
        Ok(_) => {}
        // The UNIQUE(nombre) constraint backstops the rule check when
        // a concurrent writer got there first.
        Err(e) if is_unique_violation(&e) => {
            return Err(ApiError::from_code(ErrorCode::AlreadyExists));
        }
        Err(e) => return Err(e.into()),
    }
    tx.commit().await?;

    tracing::info!(name, "prediction submitted");
    let mut response = MessageResponse::new("Predicción agregada con éxito");
    if verdict.near_duplicate {
        response = response.with_warning(NEAR_DUPLICATE_WARNING_SUBMIT);
    }
    Ok(response)
}

/// Apply a participant's single allowed edit.
pub async fn modify_prediction(
    db: &DbClient,
    name: &str,
    results: &[String],
) -> ApiResult<MessageResponse> {
    let mut tx = db.pool().begin().await?;
    let locked = db::load_locked(&mut *tx).await?;
    let store = snapshot(&mut tx).await?;

    let verdict = admit_modification(locked, name, results, &store)?;

    let (fecha, hora) = submission_stamp();
    let outcomes = verdict.forecast.outcomes();
    sqlx::query(
        "UPDATE prediccion
         SET resultado1 = ?1, resultado2 = ?2, resultado3 = ?3,
             fecha = ?4, hora = ?5, modificaciones = modificaciones + 1
         WHERE nombre = ?6",
    )
    .bind(&outcomes[0])
    .bind(&outcomes[1])
    .bind(&outcomes[2])
    .bind(&fecha)
    .bind(&hora)
    .bind(name)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;

    tracing::info!(name, "prediction modified");
    let mut response = MessageResponse::new("Predicción modificada con éxito");
    if verdict.near_duplicate {
        response = response.with_warning(NEAR_DUPLICATE_WARNING_MODIFY);
    }
    Ok(response)
}

/// Snapshot the store as domain entities, in insertion order.
async fn snapshot(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
) -> ApiResult<Vec<Prediction>> {
    let rows = db::load_predictions(&mut **tx).await?;
    Ok(rows.iter().map(|r| r.to_prediction()).collect())
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|d| matches!(d.kind(), sqlx::error::ErrorKind::UniqueViolation))
        .unwrap_or(false)
}
