use axum_extra::extract::cookie::Key;
use std::env;

use crate::error::CalcError;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_DATABASE_URL: &str = "sqlite:calc.sqlite3";
/// Shortest secret `Key::derive_from` accepts
const MIN_SECRET_LEN: usize = 32;

/// Runtime settings, read from the environment (and `.env` if present)
///
/// | Variable         | Default               |
/// |------------------|-----------------------|
/// | `CALC_BIND_ADDR` | `127.0.0.1:3000`      |
/// | `DATABASE_URL`   | `sqlite:calc.sqlite3` |
/// | `SECRET_KEY`     | random per process    |
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    pub secret_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            secret_key: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let defaults = Config::default();

        Config {
            bind_addr: env::var("CALC_BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            secret_key: env::var("SECRET_KEY").ok().filter(|s| !s.is_empty()),
        }
    }

    /// Key used to sign session cookies
    ///
    /// # Errors
    /// * `CalcError::Config` if `SECRET_KEY` is set but shorter than 32 bytes
    pub fn session_key(&self) -> Result<Key, CalcError> {
        match &self.secret_key {
            Some(secret) if secret.len() < MIN_SECRET_LEN => Err(CalcError::Config(format!(
                "SECRET_KEY must be at least {} bytes",
                MIN_SECRET_LEN
            ))),
            Some(secret) => Ok(Key::derive_from(secret.as_bytes())),
            None => {
                log::warn!("SECRET_KEY not set; sessions will not survive a restart");
                Ok(Key::generate())
            }
        }
    }
}
