//! API Configuration Module
//!
//! Configuration is loaded from environment variables with sensible
//! defaults for development. Covers CORS, the bind address, and the
//! shared admin secret that gates the week-reset and lock endpoints.

use secrecy::{ExposeSecret, SecretString};

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// API configuration for CORS and production hardening.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(), // Empty = allow all
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `QUINIELA_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    pub fn from_env() -> Self {
        let cors_origins = std::env::var("QUINIELA_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self { cors_origins }
    }

    /// Check if running in production mode (strict CORS).
    pub fn is_production(&self) -> bool {
        !self.cors_origins.is_empty()
    }
}

/// Check if running in a production environment.
pub fn is_production_environment() -> bool {
    std::env::var("QUINIELA_ENVIRONMENT")
        .map(|e| matches!(e.to_lowercase().as_str(), "production" | "prod"))
        .unwrap_or(false)
}

// ============================================================================
// ADMIN SECRET
// ============================================================================

/// Development default, mirroring the deployment the service replaces.
/// Refused in production by `validate_for_production`.
const DEFAULT_ADMIN_KEY: &str = "admin123";

/// Shared admin secret gating the week-reset and lock endpoints.
///
/// The secret is wrapped in `secrecy::SecretString` so it is never
/// accidentally logged or displayed, and comparisons run in constant
/// time over the presented value.
#[derive(Clone)]
pub struct AdminConfig {
    key: SecretString,
}

impl AdminConfig {
    pub fn new(key: impl Into<String>) -> Self {
        let key: String = key.into();
        Self {
            key: SecretString::from(key),
        }
    }

    /// Create AdminConfig from environment variables.
    ///
    /// Environment variables:
    /// - `QUINIELA_ADMIN_KEY`: the shared admin secret (default: dev literal)
    pub fn from_env() -> Self {
        let key = std::env::var("QUINIELA_ADMIN_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ADMIN_KEY.to_string());
        Self::new(key)
    }

    /// Compare a presented secret against the configured one.
    ///
    /// The comparison always walks the full presented value so timing
    /// does not reveal how long a prefix matched.
    pub fn verify(&self, presented: &str) -> bool {
        constant_time_eq(self.key.expose_secret().as_bytes(), presented.as_bytes())
    }

    /// Whether the insecure development default is still configured.
    pub fn is_default_key(&self) -> bool {
        self.key.expose_secret() == DEFAULT_ADMIN_KEY
    }

    /// Refuse to start in production with the development default.
    pub fn validate_for_production(&self) -> Result<(), crate::error::ApiError> {
        if self.is_default_key() {
            return Err(crate::error::ApiError::internal_error(
                "QUINIELA_ADMIN_KEY is not set - refusing to start in production \
                 with the default admin secret",
            ));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AdminConfig([REDACTED, {} chars])",
            self.key.expose_secret().len()
        )
    }
}

/// Byte-wise comparison that does not short-circuit on the first
/// mismatch. Length is folded into the accumulator rather than checked
/// up front.
fn constant_time_eq(expected: &[u8], presented: &[u8]) -> bool {
    let mut diff = expected.len() ^ presented.len();
    for i in 0..presented.len() {
        let e = expected.get(i).copied().unwrap_or(0);
        diff |= usize::from(e ^ presented[i]);
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert!(config.cors_origins.is_empty());
        assert!(!config.is_production());
    }

    #[test]
    fn test_is_production_with_origins() {
        let config = ApiConfig {
            cors_origins: vec!["https://quiniela.example".to_string()],
        };
        assert!(config.is_production());
    }

    #[test]
    fn test_admin_verify() {
        let admin = AdminConfig::new("s3cret");
        assert!(admin.verify("s3cret"));
        assert!(!admin.verify("s3cre"));
        assert!(!admin.verify("s3cret "));
        assert!(!admin.verify(""));
    }

    #[test]
    fn test_default_key_detection() {
        assert!(AdminConfig::new("admin123").is_default_key());
        assert!(!AdminConfig::new("rotated").is_default_key());
    }

    #[test]
    fn test_production_validation_refuses_default() {
        assert!(AdminConfig::new("admin123").validate_for_production().is_err());
        assert!(AdminConfig::new("rotated").validate_for_production().is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let admin = AdminConfig::new("s3cret");
        let debug = format!("{:?}", admin);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_constant_time_eq_handles_lengths() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"ab"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(!constant_time_eq(b"", b"x"));
        assert!(constant_time_eq(b"", b""));
    }
}
