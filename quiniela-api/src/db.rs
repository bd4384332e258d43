//! Database Module
//!
//! SQLite access through an sqlx connection pool. The backing store is
//! configured with a connection string (`DATABASE_URL`) and defaults to
//! an embedded file-backed database. The schema is applied at startup
//! with idempotent DDL.
//!
//! `DbClient` exposes the snapshot reads the GET endpoints need; the
//! mutating flows live in the service layer and run against a single
//! transaction each, using the row helpers at the bottom of this
//! module.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{FromRow, Sqlite, SqlitePool};
use std::str::FromStr;

use crate::error::{ApiError, ApiResult};
use quiniela_core::{Forecast, Match, Prediction};

// ============================================================================
// CONNECTION POOL CONFIGURATION
// ============================================================================

/// Database connection configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Connection string, e.g. `sqlite://quiniela.db` or `sqlite::memory:`
    pub url: String,
    /// Maximum pool size
    pub max_connections: u32,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://quiniela.db".to_string(),
            max_connections: 5,
        }
    }
}

impl DbConfig {
    /// Create a new database configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_URL`: connection string (default: `sqlite://quiniela.db`)
    /// - `QUINIELA_DB_POOL_SIZE`: maximum pool size (default: 5)
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://quiniela.db".to_string()),
            max_connections: std::env::var("QUINIELA_DB_POOL_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        }
    }

    /// In-memory database, used by tests.
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }

    /// Create a connection pool from this configuration.
    pub async fn create_pool(&self) -> ApiResult<SqlitePool> {
        let options = SqliteConnectOptions::from_str(&self.url)
            .map_err(|e| {
                ApiError::database_error(format!("Invalid DATABASE_URL '{}': {}", self.url, e))
            })?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true);

        // Every pool connection of an in-memory database is a separate
        // database; a single connection keeps one coherent store.
        let max_connections = if self.url.contains(":memory:") {
            1
        } else {
            self.max_connections
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(|e| ApiError::database_error(format!("Failed to create pool: {}", e)))?;

        Ok(pool)
    }
}

// ============================================================================
// SCHEMA
// ============================================================================

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS partido (
        id INTEGER PRIMARY KEY,
        equipo1 TEXT NOT NULL,
        equipo2 TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS prediccion (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        nombre TEXT NOT NULL UNIQUE,
        resultado1 TEXT NOT NULL,
        resultado2 TEXT NOT NULL,
        resultado3 TEXT NOT NULL,
        fecha TEXT NOT NULL,
        hora TEXT NOT NULL,
        modificaciones INTEGER NOT NULL DEFAULT 0
    )",
    // Single-row table backing the submission lock, so the flag
    // survives restarts and commits together with the mutation that
    // flips it.
    "CREATE TABLE IF NOT EXISTS estado_quiniela (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        bloqueada INTEGER NOT NULL DEFAULT 0
    )",
    "INSERT OR IGNORE INTO estado_quiniela (id, bloqueada) VALUES (1, 0)",
];

// ============================================================================
// ROW TYPES
// ============================================================================

/// Raw `partido` row.
#[derive(Debug, Clone, FromRow)]
struct MatchRow {
    id: i64,
    equipo1: String,
    equipo2: String,
}

impl From<MatchRow> for Match {
    fn from(row: MatchRow) -> Self {
        Match {
            id: row.id,
            team_one: row.equipo1,
            team_two: row.equipo2,
        }
    }
}

/// Raw `prediccion` row.
#[derive(Debug, Clone, FromRow)]
pub struct PredictionRow {
    pub id: i64,
    pub nombre: String,
    pub resultado1: String,
    pub resultado2: String,
    pub resultado3: String,
    pub fecha: String,
    pub hora: String,
    pub modificaciones: i64,
}

impl PredictionRow {
    /// Convert into the domain entity the rule engine works on.
    pub fn to_prediction(&self) -> Prediction {
        Prediction {
            name: self.nombre.clone(),
            forecast: Forecast::new([
                self.resultado1.clone(),
                self.resultado2.clone(),
                self.resultado3.clone(),
            ]),
            date: self.fecha.clone(),
            time: self.hora.clone(),
            modifications: self.modificaciones,
        }
    }
}

// ============================================================================
// DATABASE CLIENT
// ============================================================================

/// Database client wrapping the connection pool with the snapshot
/// reads the API serves.
#[derive(Clone)]
pub struct DbClient {
    pool: SqlitePool,
}

impl DbClient {
    /// Create a new database client with the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new database client from configuration and apply the
    /// schema.
    pub async fn from_config(config: &DbConfig) -> ApiResult<Self> {
        let pool = config.create_pool().await?;
        let client = Self::new(pool);
        client.init_schema().await?;
        Ok(client)
    }

    /// The underlying pool, for transactional flows in the service
    /// layer.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Apply the idempotent schema.
    pub async fn init_schema(&self) -> ApiResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Connectivity probe for the readiness endpoint.
    pub async fn ping(&self) -> ApiResult<()> {
        sqlx::query_scalar::<_, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }

    /// The current match registry, ordered by id.
    pub async fn match_list(&self) -> ApiResult<Vec<Match>> {
        let rows = sqlx::query_as::<_, MatchRow>(
            "SELECT id, equipo1, equipo2 FROM partido ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Match::from).collect())
    }

    /// All predictions, most recent submission first. The stored
    /// dd/mm/YYYY strings sort like the original's fecha column; hora
    /// breaks ties within a day.
    pub async fn prediction_list(&self) -> ApiResult<Vec<PredictionRow>> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            "SELECT id, nombre, resultado1, resultado2, resultado3, fecha, hora, modificaciones
             FROM prediccion ORDER BY fecha DESC, hora DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Whether the submission window is currently closed.
    pub async fn submissions_locked(&self) -> ApiResult<bool> {
        let locked: i64 =
            sqlx::query_scalar("SELECT bloqueada FROM estado_quiniela WHERE id = 1")
                .fetch_one(&self.pool)
                .await?;
        Ok(locked != 0)
    }
}

// ============================================================================
// TRANSACTION-SCOPED HELPERS
// ============================================================================

/// Load the full prediction store in insertion order, for the
/// duplicate scan inside a mutating transaction.
pub(crate) async fn load_predictions<'e, E>(executor: E) -> Result<Vec<PredictionRow>, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, PredictionRow>(
        "SELECT id, nombre, resultado1, resultado2, resultado3, fecha, hora, modificaciones
         FROM prediccion ORDER BY id",
    )
    .fetch_all(executor)
    .await
}

/// Read the lock flag inside a transaction.
pub(crate) async fn load_locked<'e, E>(executor: E) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let locked: i64 = sqlx::query_scalar("SELECT bloqueada FROM estado_quiniela WHERE id = 1")
        .fetch_one(executor)
        .await?;
    Ok(locked != 0)
}

/// Write the lock flag inside a transaction.
pub(crate) async fn store_locked<'e, E>(executor: E, locked: bool) -> Result<(), sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query("UPDATE estado_quiniela SET bloqueada = ?1 WHERE id = 1")
        .bind(i64::from(locked))
        .execute(executor)
        .await?;
    Ok(())
}
