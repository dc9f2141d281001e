use std::env;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

use crate::error::StartupError;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        let database_url = var("DATABASE_URL").ok_or(StartupError::MissingConfig("DATABASE_URL"))?;

        let service_port = match var("PORT") {
            Some(port) => port.parse::<u16>().map_err(|err| StartupError::InvalidConfig {
                name: "PORT",
                reason: format!("{port:?} is not a valid port number (0-65535): {err}"),
            })?,
            None => DEFAULT_PORT,
        };

        let service_host = var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let max_connections = match var("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(StartupError::InvalidConfig {
                        name: "DATABASE_MAX_CONNECTIONS",
                        reason: format!("{raw:?} is not a positive integer"),
                    });
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let acquire_timeout_secs = match var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|err| StartupError::InvalidConfig {
                name: "DATABASE_ACQUIRE_TIMEOUT_SECS",
                reason: format!("{raw:?}: {err}"),
            })?,
            None => DEFAULT_ACQUIRE_TIMEOUT_SECS,
        };

        Ok(Config {
            database_url,
            max_connections,
            acquire_timeout_secs,
            service_port,
            service_host,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    /// Connection target without credentials, safe to log.
    ///
    /// Parsed with the driver's own URL rules so passwords in the userinfo
    /// or in a `password=` query parameter never reach the output.
    pub fn redacted_database_url(&self) -> String {
        let Ok(options) = PgConnectOptions::from_str(&self.database_url) else {
            return "<unparseable DATABASE_URL>".to_string();
        };

        let location = match options.get_socket() {
            Some(socket) => socket.display().to_string(),
            None => format!("{}:{}", options.get_host(), options.get_port()),
        };
        format!(
            "postgres://{}@{}/{}",
            options.get_username(),
            location,
            options.get_database().unwrap_or_default()
        )
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Database: {}", self.redacted_database_url());
        tracing::info!("  Pool: max {} connections, acquire timeout {}s",
            self.max_connections, self.acquire_timeout_secs);
        tracing::info!("  Service listening on: {}", self.listen_addr());
    }
}
