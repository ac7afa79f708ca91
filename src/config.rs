use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all threads and services.
/// It is pulled into the application state via FromRef, embodying the "immutable AppConfig"
/// part of the Unified State Pattern.
#[derive(Clone)]
pub struct AppConfig {
    // Database connection string (SQLite).
    pub db_url: String,
    // Runtime environment marker. Controls log formatting and demo data seeding.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (pretty logs, demo seed data) and production-grade behavior (JSON logs, strict config).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows us to instantiate the configuration without needing to set environment
    /// variables for lightweight unit or integration testing state scaffolding.
    fn default() -> Self {
        Self {
            // In-memory database so tests never touch the filesystem.
            db_url: "sqlite::memory:".to_string(),
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the **fail-fast** principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current runtime environment
    /// (especially Production) is not found. This prevents the application from starting
    /// with an incomplete configuration.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        match env {
            Env::Local => Self {
                env: Env::Local,
                // Local development falls back to an on-disk SQLite file created on demand.
                db_url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://app.db?mode=rwc".to_string()),
            },
            Env::Production => Self {
                env: Env::Production,
                // Production demands an explicit database location.
                db_url: env::var("DATABASE_URL").expect("FATAL: DATABASE_URL required in prod"),
            },
        }
    }
}
