//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for overrides in tests.

use std::env;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    pub session_expiry_minutes: i64,
    pub otp_expiry_minutes: i64,
    pub gmail_username: String,
    pub gmail_app_password: String,
    pub email_from_name: String,
    pub bootstrap_owner_email: String,
    pub bootstrap_owner_password: String,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Panics if required variables are missing or improperly formatted.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "rollcall-api".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            database_path: env::var("DATABASE_PATH").expect("DATABASE_PATH is required"),
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".into())
                .parse()
                .unwrap(),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET is required"),
            jwt_duration_minutes: env::var("JWT_DURATION_MINUTES")
                .unwrap_or("1440".into())
                .parse()
                .unwrap(),
            session_expiry_minutes: env::var("SESSION_EXPIRY_MINUTES")
                .unwrap_or("15".into())
                .parse()
                .unwrap(),
            otp_expiry_minutes: env::var("OTP_EXPIRY_MINUTES")
                .unwrap_or("5".into())
                .parse()
                .unwrap(),
            gmail_username: env::var("GMAIL_USERNAME").unwrap_or_default(),
            gmail_app_password: env::var("GMAIL_APP_PASSWORD").unwrap_or_default(),
            email_from_name: env::var("EMAIL_FROM_NAME").unwrap_or_else(|_| "Rollcall".into()),
            bootstrap_owner_email: env::var("BOOTSTRAP_OWNER_EMAIL")
                .unwrap_or_else(|_| "admin@school.com".into()),
            bootstrap_owner_password: env::var("BOOTSTRAP_OWNER_PASSWORD")
                .unwrap_or_else(|_| "admin123".into()),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Replaces the global configuration. Intended for tests.
    pub fn override_global(new: AppConfig) {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(new.clone()));
        *lock.write().expect("Failed to acquire AppConfig write lock") = new;
    }

    /// A fully-populated configuration that does not touch the process
    /// environment. Intended for tests.
    pub fn test_defaults() -> Self {
        Self {
            env: "test".into(),
            project_name: "rollcall-api".into(),
            log_level: "api=info".into(),
            log_file: "api.log".into(),
            log_to_stdout: false,
            database_path: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt_secret: "test-secret".into(),
            jwt_duration_minutes: 1440,
            session_expiry_minutes: 15,
            otp_expiry_minutes: 5,
            gmail_username: String::new(),
            gmail_app_password: String::new(),
            email_from_name: "Rollcall".into(),
            bootstrap_owner_email: "admin@school.com".into(),
            bootstrap_owner_password: "admin123".into(),
        }
    }
}

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn jwt_secret() -> String {
    AppConfig::global().jwt_secret.clone()
}

pub fn jwt_duration_minutes() -> u64 {
    AppConfig::global().jwt_duration_minutes
}

pub fn session_expiry_minutes() -> i64 {
    AppConfig::global().session_expiry_minutes
}

pub fn otp_expiry_minutes() -> i64 {
    AppConfig::global().otp_expiry_minutes
}

pub fn gmail_username() -> String {
    AppConfig::global().gmail_username.clone()
}

pub fn gmail_app_password() -> String {
    AppConfig::global().gmail_app_password.clone()
}

pub fn email_from_name() -> String {
    AppConfig::global().email_from_name.clone()
}

pub fn bootstrap_owner_email() -> String {
    AppConfig::global().bootstrap_owner_email.clone()
}

pub fn bootstrap_owner_password() -> String {
    AppConfig::global().bootstrap_owner_password.clone()
}
