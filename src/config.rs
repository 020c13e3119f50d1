//! Configuration management for the contact book.
//!
//! Settings come from environment variables, optionally seeded from a `.env`
//! file. Every variable has a default so a bare `cargo run` against a local
//! MongoDB works.

use crate::domain::PhoneLocale;
use crate::error::{ConfigError, ConfigResult};
use crate::models::Employee;
use std::env;
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

/// Where contacts are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    #[default]
    Mongodb,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::Mongodb),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue {
                var: "CONTACT_STORE".to_string(),
                reason: format!("Must be 'mongodb' or 'memory', got: {}", other),
            }),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mongodb => f.write_str("mongodb"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Configuration for the contact book server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address (default: "0.0.0.0")
    pub host: String,

    /// Listen port (default: 3000)
    pub port: u16,

    /// MongoDB connection string
    pub mongodb_uri: String,

    /// MongoDB database holding the `contacts` collection (default: "wpu")
    pub mongodb_database: String,

    /// Contact store backend (default: mongodb)
    pub storage: StorageBackend,

    /// Locale used to validate phone numbers (default: id-ID)
    pub phone_locale: PhoneLocale,

    /// Server-side session lifetime in seconds (default: 6)
    pub session_ttl_secs: u64,

    /// Directory served for paths no route matches (default: "public")
    pub static_dir: PathBuf,

    /// Log level used when RUST_LOG is unset (default: "info")
    pub log_level: String,

    /// Staff shown on the home page
    pub staff: Vec<Employee>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `HOST`: Bind address (default: 0.0.0.0)
    /// - `PORT`: Listen port (default: 3000)
    /// - `MONGODB_URI`: Connection string (default: mongodb://127.0.0.1:27017)
    /// - `MONGODB_DATABASE`: Database name (default: wpu)
    /// - `CONTACT_STORE`: `mongodb` or `memory` (default: mongodb)
    /// - `PHONE_LOCALE`: `id-ID`, `en-US`, `en-GB` or `any` (default: id-ID)
    /// - `SESSION_TTL_SECS`: Session lifetime in seconds (default: 6)
    /// - `STATIC_DIR`: Static asset directory (default: public)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env is fine
        let _ = dotenvy::dotenv();

        let defaults = Config::default();

        let host = env::var("HOST").unwrap_or(defaults.host);
        let port = Self::parse_env_u16("PORT", defaults.port)?;

        let mongodb_uri = env::var("MONGODB_URI").unwrap_or(defaults.mongodb_uri);
        if !mongodb_uri.starts_with("mongodb://") && !mongodb_uri.starts_with("mongodb+srv://") {
            return Err(ConfigError::InvalidValue {
                var: "MONGODB_URI".to_string(),
                reason: "Must start with mongodb:// or mongodb+srv://".to_string(),
            });
        }

        let mongodb_database = env::var("MONGODB_DATABASE").unwrap_or(defaults.mongodb_database);
        if mongodb_database.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "MONGODB_DATABASE".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let storage = match env::var("CONTACT_STORE") {
            Ok(val) => val.parse()?,
            Err(_) => defaults.storage,
        };

        let phone_locale = match env::var("PHONE_LOCALE") {
            Ok(val) => val.parse().map_err(|e: crate::domain::ValidationError| {
                ConfigError::InvalidValue {
                    var: "PHONE_LOCALE".to_string(),
                    reason: e.to_string(),
                }
            })?,
            Err(_) => defaults.phone_locale,
        };

        let session_ttl_secs = Self::parse_env_u64("SESSION_TTL_SECS", defaults.session_ttl_secs)?;
        if session_ttl_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: "SESSION_TTL_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let log_level = env::var("LOG_LEVEL").unwrap_or(defaults.log_level);

        Ok(Config {
            host,
            port,
            mongodb_uri,
            mongodb_database,
            storage,
            phone_locale,
            session_ttl_secs,
            static_dir,
            log_level,
            staff: defaults.staff,
        })
    }

    /// The socket address to listen on.
    pub fn bind_addr(&self) -> ConfigResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                var: "HOST".to_string(),
                reason: format!("Not a valid bind address: {}", self.host),
            })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as u16 with a default value.
    fn parse_env_u16(var_name: &str, default: u16) -> ConfigResult<u16> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a port number between 0-65535, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 3000,
            mongodb_uri: "mongodb://127.0.0.1:27017".to_string(),
            mongodb_database: "wpu".to_string(),
            storage: StorageBackend::Mongodb,
            phone_locale: PhoneLocale::IdId,
            session_ttl_secs: 6,
            static_dir: PathBuf::from("public"),
            log_level: "info".to_string(),
            staff: Employee::default_roster(),
        }
    }
}
