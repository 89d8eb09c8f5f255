//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MANDAP_BASE_URL` - Public URL for the server (scheme decides
//!   whether the session cookie is marked secure)
//!
//! ## Optional
//! - `MANDAP_HOST` - Bind address (default: 127.0.0.1)
//! - `MANDAP_PORT` - Listen port (default: 3000)
//! - `MANDAP_SESSION_DAYS` - Remember-me session lifetime in days
//!   (default: 30)
//! - `MANDAP_SEED_SUPERADMIN_EMAIL` - Superadmin account to provision
//!   at startup
//! - `MANDAP_SEED_SUPERADMIN_PASSWORD` - Password for the seeded
//!   account (required if the email is set)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct MandapConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the server
    pub base_url: String,
    /// Remember-me session lifetime in days
    pub session_days: u32,
    /// Superadmin account seeded at startup, if configured
    pub seed_superadmin: Option<SeedSuperadmin>,
}

/// Startup-seeded superadmin credentials.
#[derive(Clone)]
pub struct SeedSuperadmin {
    pub email: String,
    pub password: SecretString,
}

impl std::fmt::Debug for SeedSuperadmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeedSuperadmin")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl MandapConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or
    /// invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("MANDAP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MANDAP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("MANDAP_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MANDAP_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("MANDAP_BASE_URL")?;
        let session_days = get_env_or_default("MANDAP_SESSION_DAYS", "30")
            .parse::<u32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("MANDAP_SESSION_DAYS".to_string(), e.to_string())
            })?;

        let seed_superadmin = match get_optional_env("MANDAP_SEED_SUPERADMIN_EMAIL") {
            Some(email) => Some(SeedSuperadmin {
                email,
                password: SecretString::from(get_required_env(
                    "MANDAP_SEED_SUPERADMIN_PASSWORD",
                )?),
            }),
            None => None,
        };

        Ok(Self {
            host,
            port,
            base_url,
            session_days,
            seed_superadmin,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
