use std::time::Duration;

use crate::errors::AppError;

const DEFAULT_DATABASE_URL: &str = "sqlite://videos.db?mode=rwc";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_APP_NAME: &str = "The Weeknd's mind";
const DEFAULT_QUERY_TIMEOUT_MS: u64 = 10000;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub listen_addr: String,
    pub app_name: String,
    pub query_timeout: Duration,
    pub db_max_connections: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            query_timeout: Duration::from_millis(DEFAULT_QUERY_TIMEOUT_MS),
            db_max_connections: DEFAULT_DB_MAX_CONNECTIONS,
        }
    }
}

impl Settings {
    /// Reads settings from the process environment. Call `dotenv::dotenv()`
    /// first to pick up a local `.env` file.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let query_timeout = match lookup("QUERY_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(parse_number("QUERY_TIMEOUT_MS", &raw)?),
            None => defaults.query_timeout,
        };

        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => parse_number("DB_MAX_CONNECTIONS", &raw)?,
            None => defaults.db_max_connections,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            listen_addr: lookup("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            app_name: lookup("APP_NAME").unwrap_or(defaults.app_name),
            query_timeout,
            db_max_connections,
        })
    }
}

fn parse_number<T>(key: &str, raw: &str) -> Result<T, AppError>
where
    T: std::str::FromStr + Default + PartialEq,
{
    match raw.trim().parse::<T>() {
        Ok(value) if value != T::default() => Ok(value),
        _ => Err(AppError::Config(format!(
            "{} must be a positive integer, got '{}'",
            key, raw
        ))),
    }
}
