//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use super::constants::{
    DEFAULT_DB_ACQUIRE_TIMEOUT_SECS, DEFAULT_DB_ADDRESS, DEFAULT_DB_CONN_MAX_IDLE_SECS,
    DEFAULT_DB_CONN_MAX_LIFETIME_SECS, DEFAULT_DB_MAX_OPEN_CONNS, DEFAULT_DB_MIN_CONNS,
    DEFAULT_DB_NAME, DEFAULT_DB_NET, DEFAULT_DB_USER, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server_host: String,
    pub server_port: u16,
    /// Deadline applied to every request's store calls; zero disables it
    pub request_timeout: Duration,
}

/// Store connection parameters.
#[derive(Clone)]
pub struct DatabaseConfig {
    /// Full connection URL; when set, the individual parts are ignored
    pub url: Option<String>,
    pub user: String,
    password: String,
    /// Network transport: `tcp` or `unix`
    pub net: String,
    /// `host:port` for tcp, socket path for unix
    pub address: String,
    pub name: String,
    pub pool: PoolSettings,
}

/// Connection pool limits.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    /// `None` leaves the driver default in place
    pub idle_timeout: Option<Duration>,
    /// `None` leaves the driver default in place
    pub max_lifetime: Option<Duration>,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_DB_MAX_OPEN_CONNS,
            min_connections: DEFAULT_DB_MIN_CONNS,
            idle_timeout: Some(Duration::from_secs(DEFAULT_DB_CONN_MAX_IDLE_SECS)),
            max_lifetime: Some(Duration::from_secs(DEFAULT_DB_CONN_MAX_LIFETIME_SECS)),
            acquire_timeout: Duration::from_secs(DEFAULT_DB_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .field("password", &"[REDACTED]")
            .field("net", &self.net)
            .field("address", &self.address)
            .field("name", &self.name)
            .field("pool", &self.pool)
            .finish()
    }
}

impl DatabaseConfig {
    /// Build a configuration from its individual parts.
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
        net: impl Into<String>,
        address: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            url: None,
            user: user.into(),
            password: password.into(),
            net: net.into(),
            address: address.into(),
            name: name.into(),
            pool: PoolSettings::default(),
        }
    }

    /// Build a configuration around a ready-made connection URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        let mut config = Self::new(DEFAULT_DB_USER, "", DEFAULT_DB_NET, DEFAULT_DB_ADDRESS, DEFAULT_DB_NAME);
        config.url = Some(url.into());
        config
    }

    /// Replace the pool limits.
    pub fn with_pool(mut self, pool: PoolSettings) -> Self {
        self.pool = pool;
        self
    }

    /// Connection URL for the store.
    ///
    /// Credentials are percent-encoded. The `unix` transport connects through
    /// the socket given in `address`.
    pub fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }

        let user = urlencoding::encode(&self.user);
        let credentials = if self.password.is_empty() {
            user.into_owned()
        } else {
            format!("{}:{}", user, urlencoding::encode(&self.password))
        };

        if self.net.eq_ignore_ascii_case("unix") {
            format!(
                "mysql://{}@localhost/{}?socket={}",
                credentials,
                self.name,
                urlencoding::encode(&self.address)
            )
        } else {
            format!("mysql://{}@{}/{}", credentials, self.address, self.name)
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let pool = PoolSettings {
            max_connections: env_parse("DB_MAX_OPEN_CONNS", DEFAULT_DB_MAX_OPEN_CONNS),
            min_connections: env_parse("DB_MIN_CONNS", DEFAULT_DB_MIN_CONNS),
            idle_timeout: seconds_or_driver_default(env_parse(
                "DB_CONN_MAX_IDLE_SECS",
                DEFAULT_DB_CONN_MAX_IDLE_SECS,
            )),
            max_lifetime: seconds_or_driver_default(env_parse(
                "DB_CONN_MAX_LIFETIME_SECS",
                DEFAULT_DB_CONN_MAX_LIFETIME_SECS,
            )),
            acquire_timeout: Duration::from_secs(env_parse(
                "DB_ACQUIRE_TIMEOUT_SECS",
                DEFAULT_DB_ACQUIRE_TIMEOUT_SECS,
            )),
        };

        let database = DatabaseConfig {
            url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            user: env::var("DB_USER").unwrap_or_else(|_| DEFAULT_DB_USER.to_string()),
            password: env::var("DB_PASSWORD").unwrap_or_default(),
            net: env::var("DB_NET").unwrap_or_else(|_| DEFAULT_DB_NET.to_string()),
            address: env::var("DB_ADDRESS").unwrap_or_else(|_| DEFAULT_DB_ADDRESS.to_string()),
            name: env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string()),
            pool,
        };

        Self {
            database,
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env_parse("SERVER_PORT", DEFAULT_SERVER_PORT),
            request_timeout: Duration::from_secs(env_parse(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Zero seconds defers to the driver default.
fn seconds_or_driver_default(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
