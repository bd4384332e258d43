//! Pool Service
//!
//! Admin workflows: the weekly reset and the submission-lock toggle.
//! Both are gated on the shared admin secret. The reset is a single
//! transaction - matches upserted, predictions cleared, lock opened -
//! so a failure mid-way leaves no partial week behind.

use quiniela_core::MATCHES_PER_WEEK;

use crate::config::AdminConfig;
use crate::db::{self, DbClient};
use crate::error::{ApiError, ApiResult};
use crate::types::{MatchUpsert, MessageResponse};

/// Replace the match registry for a new week, clear every prediction,
/// and reopen submissions.
pub async fn reset_week(
    db: &DbClient,
    admin: &AdminConfig,
    clave: &str,
    matches: &[MatchUpsert],
) -> ApiResult<MessageResponse> {
    if !admin.verify(clave) {
        return Err(ApiError::unauthorized());
    }
    if matches.len() != MATCHES_PER_WEEK {
        return Err(ApiError::invalid_input("Se deben enviar 3 partidos"));
    }

    let mut tx = db.pool().begin().await?;
    for m in matches {
        sqlx::query(
            "INSERT INTO partido (id, equipo1, equipo2) VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                 equipo1 = excluded.equipo1,
                 equipo2 = excluded.equipo2",
        )
        .bind(m.id)
        .bind(&m.equipo1)
        .bind(&m.equipo2)
        .execute(&mut *tx)
        .await?;
    }
    sqlx::query("DELETE FROM prediccion").execute(&mut *tx).await?;
    db::store_locked(&mut *tx, false).await?;
    tx.commit().await?;

    tracing::info!("week reset: matches replaced, predictions cleared, lock opened");
    Ok(MessageResponse::new(
        "Partidos actualizados y predicciones reiniciadas.",
    ))
}

/// Set the submission lock to the desired state.
pub async fn set_lock(
    db: &DbClient,
    admin: &AdminConfig,
    clave: &str,
    desired: Option<bool>,
) -> ApiResult<MessageResponse> {
    if !admin.verify(clave) {
        return Err(ApiError::unauthorized());
    }
    let desired = desired.ok_or_else(|| {
        ApiError::invalid_input("Se debe enviar el parámetro 'bloquear' (true o false)")
    })?;

    db::store_locked(db.pool(), desired).await?;

    let estado = if desired { "bloqueadas" } else { "desbloqueadas" };
    tracing::info!(locked = desired, "submission lock updated");
    Ok(MessageResponse::new(format!(
        "Las predicciones han sido {}.",
        estado
    )))
}
