//! Connection settings for the document store
//!
//! A [`StoreConfig`] carries everything needed to build the connection URI
//! plus a handful of driver options that are forwarded untouched.

use aac_common::{Result, StoreError};
use mongodb::options::WriteConcern;
use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;
use std::net::Ipv6Addr;
use std::time::Duration;

pub const DEFAULT_DATABASE_NAME: &str = "aac";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 27017;
pub const DEFAULT_AUTH_SOURCE: &str = "admin";
pub const DEFAULT_APP_NAME: &str = "aac-mongodb";

/// Environment variables read by [`StoreConfig::from_env`]
pub const ENV_USERNAME: &str = "AAC_MONGO_USERNAME";
pub const ENV_PASSWORD: &str = "AAC_MONGO_PASSWORD";
pub const ENV_DATABASE: &str = "AAC_MONGO_DATABASE";
pub const ENV_HOST: &str = "AAC_MONGO_HOST";
pub const ENV_PORT: &str = "AAC_MONGO_PORT";
pub const ENV_AUTH_SOURCE: &str = "AAC_MONGO_AUTH_SOURCE";

/// Document store connection configuration
#[derive(Clone, Deserialize)]
pub struct StoreConfig {
    pub username: String,
    pub password: String,
    /// Working database (default: "aac")
    #[serde(default = "default_database_name")]
    pub database_name: String,
    /// Server host (default: "localhost")
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port (default: 27017)
    #[serde(default = "default_port")]
    pub port: u16,
    /// Authentication database placed in the URI (default: "admin")
    #[serde(default = "default_auth_source")]
    pub auth_source: String,
    /// Application name for server logs
    #[serde(default = "default_app_name")]
    pub app_name: Option<String>,
    /// Connection timeout in milliseconds (default: driver's)
    #[serde(default)]
    pub connect_timeout_ms: Option<u64>,
    /// Server selection timeout in milliseconds (default: driver's)
    #[serde(default)]
    pub server_selection_timeout_ms: Option<u64>,
    /// Write concern applied to the whole client (default: driver's)
    #[serde(skip)]
    pub write_concern: Option<WriteConcern>,
}

fn default_database_name() -> String {
    DEFAULT_DATABASE_NAME.to_string()
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_auth_source() -> String {
    DEFAULT_AUTH_SOURCE.to_string()
}

fn default_app_name() -> Option<String> {
    Some(DEFAULT_APP_NAME.to_string())
}

fn saturating_millis(timeout: Duration) -> u64 {
    u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX)
}

/// IPv6 literals must be bracketed inside a URI authority
fn uri_host(host: &str) -> Cow<'_, str> {
    if host.parse::<Ipv6Addr>().is_ok() {
        Cow::Owned(format!("[{}]", host))
    } else {
        Cow::Borrowed(host)
    }
}

impl StoreConfig {
    /// Create a config with the given credentials and default target
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            database_name: default_database_name(),
            host: default_host(),
            port: DEFAULT_PORT,
            auth_source: default_auth_source(),
            app_name: default_app_name(),
            connect_timeout_ms: None,
            server_selection_timeout_ms: None,
            write_concern: None,
        }
    }

    pub fn with_database(mut self, name: impl Into<String>) -> Self {
        self.database_name = name.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_auth_source(mut self, auth_source: impl Into<String>) -> Self {
        self.auth_source = auth_source.into();
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = Some(saturating_millis(timeout));
        self
    }

    pub fn with_server_selection_timeout(mut self, timeout: Duration) -> Self {
        self.server_selection_timeout_ms = Some(saturating_millis(timeout));
        self
    }

    pub fn with_write_concern(mut self, write_concern: WriteConcern) -> Self {
        self.write_concern = Some(write_concern);
        self
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout_ms.map(Duration::from_millis)
    }

    pub fn server_selection_timeout(&self) -> Option<Duration> {
        self.server_selection_timeout_ms.map(Duration::from_millis)
    }

    /// Build the connection URI
    ///
    /// Shape: `mongodb://<username>:<password>@<host>:<port>/?authSource=<authSource>`.
    /// Credentials are percent-encoded so reserved characters survive URI parsing,
    /// and a bare IPv6 host is wrapped in brackets.
    pub fn connection_uri(&self) -> String {
        format!(
            "mongodb://{}:{}@{}:{}/?authSource={}",
            urlencoding::encode(&self.username),
            urlencoding::encode(&self.password),
            uri_host(&self.host),
            self.port,
            self.auth_source
        )
    }

    /// Parse a JSON config; omitted optional keys take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| StoreError::Configuration(format!("invalid JSON config: {}", e)))
    }

    /// Load the config from `AAC_MONGO_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`StoreConfig::from_env`] with an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| StoreError::Configuration(format!("{} is not set", key)))
        };

        let mut config = Self::new(required(ENV_USERNAME)?, required(ENV_PASSWORD)?);

        if let Some(database) = lookup(ENV_DATABASE) {
            config.database_name = database;
        }
        if let Some(host) = lookup(ENV_HOST) {
            config.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            config.port = port.parse().map_err(|_| {
                StoreError::Configuration(format!("{} must be a port number, got '{}'", ENV_PORT, port))
            })?;
        }
        if let Some(auth_source) = lookup(ENV_AUTH_SOURCE) {
            config.auth_source = auth_source;
        }

        Ok(config)
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("database_name", &self.database_name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("auth_source", &self.auth_source)
            .field("app_name", &self.app_name)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("server_selection_timeout_ms", &self.server_selection_timeout_ms)
            .field("write_concern", &self.write_concern)
            .finish()
    }
}
