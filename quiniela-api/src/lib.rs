//! Quiniela API - REST API Layer
//!
//! This crate provides the HTTP surface of the weekly prediction pool:
//! Axum routes over an SQLite store, with the admission rules from
//! `quiniela-core` executed inside per-request transactions.

pub mod config;
pub mod db;
pub mod error;
pub mod openapi;
pub mod report;
pub mod routes;
pub mod services;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use config::{AdminConfig, ApiConfig};
pub use db::{DbClient, DbConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use openapi::ApiDoc;
pub use routes::create_api_router;
pub use types::*;
