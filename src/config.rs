// src/config.rs

use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    /// Session token lifetime in seconds. Tokens older than this are rejected.
    pub jwt_expiration: u64,
    pub rust_log: String,
    /// Optional seed account with the 'guru' role, created at startup if missing.
    pub guru_username: Option<String>,
    pub guru_password: Option<String>,
    /// Optional maintenance job: wipe all scores every N seconds.
    /// Off unless explicitly configured.
    pub reset_interval: Option<u64>,
}

/// Default session lifetime: 7 days.
pub const DEFAULT_JWT_EXPIRATION: u64 = 60 * 60 * 24 * 7;

impl Config {
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:kuis.db".to_string());

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_JWT_EXPIRATION);

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let guru_username = env::var("GURU_USERNAME").ok();
        let guru_password = env::var("GURU_PASSWORD").ok();

        let reset_interval = env::var("RESET_INTERVAL")
            .ok()
            .and_then(|v| v.parse().ok());

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            rust_log,
            guru_username,
            guru_password,
            reset_interval,
        }
    }
}
