//! Environment-sourced configuration.
//! Used by: main, state.

use crate::error::{Error, Result};

/// Default session token lifetime: two days.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 172_800;

/// Default lifetime for the token issued at registration: ten minutes.
pub const DEFAULT_GRANT_TTL_SECS: i64 = 600;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub db_path: String,
    pub jwt_secret: String,
    pub session_ttl_secs: i64,
    pub grant_ttl_secs: i64,
}

impl Config {
    /// Reads configuration from the environment. The signing secret has no
    /// default: a deployment without JWT_SECRET must not start.
    pub fn from_env() -> Result<Self> {
        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| Error::Config("JWT_SECRET must be set".into()))?;
        if jwt_secret.is_empty() {
            return Err(Error::Config("JWT_SECRET must not be empty".into()));
        }

        Ok(Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8000".into()),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "accounts.db".into()),
            jwt_secret,
            session_ttl_secs: env_i64("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
            grant_ttl_secs: env_i64("GRANT_TTL_SECS", DEFAULT_GRANT_TTL_SECS)?,
        })
    }
}

fn env_i64(key: &str, default: i64) -> Result<i64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| Error::Config(format!("{} must be an integer, got {:?}", key, raw))),
        Err(_) => Ok(default),
    }
}
