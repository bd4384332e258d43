//! Quiniela API Server Entry Point
//!
//! Bootstraps configuration, opens the database (applying the schema),
//! and starts the Axum HTTP server.

use std::net::SocketAddr;

use axum::Router;
use quiniela_api::{
    create_api_router, AdminConfig, ApiConfig, ApiError, ApiResult, DbClient, DbConfig,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ApiResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_config = DbConfig::from_env();
    let db = DbClient::from_config(&db_config).await?;

    let api_config = ApiConfig::from_env();
    let admin_config = AdminConfig::from_env();
    if quiniela_api::config::is_production_environment() {
        admin_config.validate_for_production()?;
    }

    let app: Router = create_api_router(db, admin_config, &api_config);

    let addr = resolve_bind_addr()?;
    tracing::info!(%addr, "Starting Quiniela API server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| ApiError::internal_error(format!("Failed to bind {}: {}", addr, e)))?;

    let server = axum::serve(listener, app);
    tokio::select! {
        result = server => {
            result.map_err(|e| ApiError::internal_error(format!("Server error: {}", e)))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}

fn resolve_bind_addr() -> ApiResult<SocketAddr> {
    let host = std::env::var("QUINIELA_API_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port_str = std::env::var("PORT")
        .ok()
        .or_else(|| std::env::var("QUINIELA_API_PORT").ok())
        .unwrap_or_else(|| "3000".to_string());
    let port = port_str
        .parse::<u16>()
        .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", port_str)))?;

    let addr = format!("{}:{}", host, port);
    addr.parse::<SocketAddr>()
        .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
}
