use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub addr: SocketAddr,
    pub max_connections: u32,
    pub locale_file: Option<PathBuf>,
    pub run_migrations: bool,
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; `from_env` passes the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        Ok(Self {
            database_url,
            addr: parse_or(&lookup, "FORUM_ADDR", DEFAULT_ADDR)?,
            max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                &DEFAULT_MAX_CONNECTIONS.to_string(),
            )?,
            locale_file: lookup("FORUM_LOCALE_FILE").map(PathBuf::from),
            run_migrations: parse_or(&lookup, "FORUM_RUN_MIGRATIONS", "true")?,
            secure_cookies: parse_or(&lookup, "FORUM_SECURE_COOKIES", "true")?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let value = lookup(key).unwrap_or_else(|| {
        tracing::info!("{} not set, using default: {}", key, default);
        default.to_string()
    });
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
