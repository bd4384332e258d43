//! End-to-end flow tests for the quiniela pool, run against an
//! in-memory SQLite store.

use quiniela_api::services::{pool_service, prediction_service};
use quiniela_api::{AdminConfig, ApiResult, DbClient, DbConfig, ErrorCode, MatchUpsert};

const ADMIN_KEY: &str = "admin123";

async fn test_db() -> ApiResult<DbClient> {
    DbClient::from_config(&DbConfig::in_memory()).await
}

fn admin() -> AdminConfig {
    AdminConfig::new(ADMIN_KEY)
}

fn week_matches() -> Vec<MatchUpsert> {
    vec![
        MatchUpsert {
            id: 1,
            equipo1: "A".to_string(),
            equipo2: "B".to_string(),
        },
        MatchUpsert {
            id: 2,
            equipo1: "C".to_string(),
            equipo2: "D".to_string(),
        },
        MatchUpsert {
            id: 3,
            equipo1: "E".to_string(),
            equipo2: "F".to_string(),
        },
    ]
}

fn results(a: &str, b: &str, c: &str) -> Vec<String> {
    vec![a.to_string(), b.to_string(), c.to_string()]
}

#[tokio::test]
async fn full_weekly_cycle() -> ApiResult<()> {
    let db = test_db().await?;
    pool_service::reset_week(&db, &admin(), ADMIN_KEY, &week_matches()).await?;

    // alice submits first, no warning
    let resp = prediction_service::submit_prediction(&db, "alice", &results("A", "C", "E")).await?;
    assert_eq!(resp.mensaje, "Predicción agregada con éxito");
    assert!(resp.warning.is_none());

    // bob matches two of three positions: accepted with a warning
    let resp = prediction_service::submit_prediction(&db, "bob", &results("A", "C", "F")).await?;
    assert!(resp.warning.is_some());

    // carol matches alice exactly: rejected, nothing persisted
    let err = prediction_service::submit_prediction(&db, "carol", &results("A", "C", "E"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DuplicateConflict);
    assert_eq!(db.prediction_list().await?.len(), 2);

    // alice spends her single edit
    let resp = prediction_service::modify_prediction(&db, "alice", &results("B", "C", "E")).await?;
    assert_eq!(resp.mensaje, "Predicción modificada con éxito");
    let alice = db
        .prediction_list()
        .await?
        .into_iter()
        .find(|p| p.nombre == "alice")
        .expect("alice still stored");
    assert_eq!(alice.modificaciones, 1);
    assert_eq!(
        [alice.resultado1, alice.resultado2, alice.resultado3],
        ["B".to_string(), "C".to_string(), "E".to_string()]
    );

    // the second edit is refused regardless of payload
    let err = prediction_service::modify_prediction(&db, "alice", &results("A", "D", "E"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ModificationLimitExceeded);

    Ok(())
}

#[tokio::test]
async fn lock_gates_submissions_and_reset_reopens() -> ApiResult<()> {
    let db = test_db().await?;
    pool_service::reset_week(&db, &admin(), ADMIN_KEY, &week_matches()).await?;

    let resp = pool_service::set_lock(&db, &admin(), ADMIN_KEY, Some(true)).await?;
    assert_eq!(resp.mensaje, "Las predicciones han sido bloqueadas.");
    assert!(db.submissions_locked().await?);

    let err = prediction_service::submit_prediction(&db, "dave", &results("1", "X", "2"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Locked);

    // modification is gated on the same flag
    let err = prediction_service::modify_prediction(&db, "dave", &results("1", "X", "2"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Locked);

    // the weekly reset reopens the window
    pool_service::reset_week(&db, &admin(), ADMIN_KEY, &week_matches()).await?;
    assert!(!db.submissions_locked().await?);
    prediction_service::submit_prediction(&db, "dave", &results("1", "X", "2")).await?;

    Ok(())
}

#[tokio::test]
async fn reset_clears_predictions_and_upserts_by_id() -> ApiResult<()> {
    let db = test_db().await?;
    pool_service::reset_week(&db, &admin(), ADMIN_KEY, &week_matches()).await?;
    prediction_service::submit_prediction(&db, "alice", &results("A", "C", "E")).await?;

    // same ids, new team names
    let next_week = vec![
        MatchUpsert {
            id: 1,
            equipo1: "G".to_string(),
            equipo2: "H".to_string(),
        },
        MatchUpsert {
            id: 2,
            equipo1: "I".to_string(),
            equipo2: "J".to_string(),
        },
        MatchUpsert {
            id: 3,
            equipo1: "K".to_string(),
            equipo2: "L".to_string(),
        },
    ];
    pool_service::reset_week(&db, &admin(), ADMIN_KEY, &next_week).await?;

    assert!(db.prediction_list().await?.is_empty());
    let matches = db.match_list().await?;
    assert_eq!(matches.len(), 3);
    assert_eq!(matches[0].team_one, "G");
    assert_eq!(matches[2].team_two, "L");

    Ok(())
}

#[tokio::test]
async fn admin_secret_and_arity_are_enforced() -> ApiResult<()> {
    let db = test_db().await?;

    let err = pool_service::reset_week(&db, &admin(), "wrong", &week_matches())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);

    let err = pool_service::reset_week(&db, &admin(), ADMIN_KEY, &week_matches()[..2])
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    let err = pool_service::set_lock(&db, &admin(), "wrong", Some(true))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);

    // missing bloquear flag
    let err = pool_service::set_lock(&db, &admin(), ADMIN_KEY, None)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    // a failed admin call must not touch the store
    assert!(db.match_list().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn one_prediction_per_name() -> ApiResult<()> {
    let db = test_db().await?;
    pool_service::reset_week(&db, &admin(), ADMIN_KEY, &week_matches()).await?;

    prediction_service::submit_prediction(&db, "alice", &results("A", "C", "E")).await?;
    let err = prediction_service::submit_prediction(&db, "alice", &results("B", "D", "F"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::AlreadyExists);
    assert_eq!(db.prediction_list().await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn short_payloads_are_rejected() -> ApiResult<()> {
    let db = test_db().await?;
    pool_service::reset_week(&db, &admin(), ADMIN_KEY, &week_matches()).await?;

    let err = prediction_service::submit_prediction(&db, "alice", &results("A", "C", "E")[..2].to_vec())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
    assert_eq!(err.message, "Se requieren 3 resultados");

    let err = prediction_service::modify_prediction(&db, "alice", &[])
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    Ok(())
}

#[tokio::test]
async fn modify_unknown_name_is_not_found() -> ApiResult<()> {
    let db = test_db().await?;
    pool_service::reset_week(&db, &admin(), ADMIN_KEY, &week_matches()).await?;

    let err = prediction_service::modify_prediction(&db, "ghost", &results("1", "X", "2"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    Ok(())
}

#[tokio::test]
async fn predictions_listed_most_recent_first() -> ApiResult<()> {
    let db = test_db().await?;
    pool_service::reset_week(&db, &admin(), ADMIN_KEY, &week_matches()).await?;

    // Seed rows with explicit stamps to pin the ordering
    for (nombre, fecha, hora) in [
        ("early", "01/03/2026", "10:00"),
        ("late", "02/03/2026", "09:00"),
        ("midday", "01/03/2026", "15:30"),
    ] {
        sqlx::query(
            "INSERT INTO prediccion
                 (nombre, resultado1, resultado2, resultado3, fecha, hora, modificaciones)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0)",
        )
        .bind(nombre)
        .bind(nombre)
        .bind("X")
        .bind("2")
        .bind(fecha)
        .bind(hora)
        .execute(db.pool())
        .await?;
    }

    let names: Vec<String> = db
        .prediction_list()
        .await?
        .into_iter()
        .map(|p| p.nombre)
        .collect();
    assert_eq!(names, ["late", "midday", "early"]);

    Ok(())
}
