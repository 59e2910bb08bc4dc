//! Client configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use std::env;
use std::time::Duration;

/// Main client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub env: Environment,
    pub socket: SocketConfig,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Real-time socket configuration
#[derive(Debug, Clone)]
pub struct SocketConfig {
    /// Candidate endpoints; one is picked at random on every connect attempt
    pub endpoints: Vec<String>,
    /// Period of the keep-alive frame
    pub heartbeat_interval: Duration,
    /// Period of the forced reconnect
    pub reconnect_interval: Duration,
    /// Upper bound on the opening handshake
    pub connect_timeout: Duration,
    /// Upper bound on a single outbound write or close
    pub write_timeout: Duration,
    /// Start the heartbeat and reconnect loops when the handler is created
    pub socket_enabled: bool,
    /// Skip TLS certificate validation for `wss` endpoints
    pub accept_invalid_certs: bool,
    /// Value of the `NDCLANG` header
    pub language: String,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            heartbeat_interval: Duration::from_secs(default_heartbeat_secs()),
            reconnect_interval: Duration::from_secs(default_reconnect_secs()),
            connect_timeout: Duration::from_secs(default_connect_timeout_secs()),
            write_timeout: Duration::from_secs(default_write_timeout_secs()),
            socket_enabled: true,
            accept_invalid_certs: true,
            language: default_language(),
        }
    }
}

impl SocketConfig {
    #[must_use]
    pub fn with_endpoints<I, S>(mut self, endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.endpoints = endpoints.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    #[must_use]
    pub fn with_reconnect_interval(mut self, interval: Duration) -> Self {
        self.reconnect_interval = interval;
        self
    }

    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_socket_enabled(mut self, enabled: bool) -> Self {
        self.socket_enabled = enabled;
        self
    }

    /// Load socket settings from a key lookup
    ///
    /// # Errors
    /// Returns an error if a value cannot be parsed or the endpoint list is empty
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let endpoints = match lookup("NDC_SOCKET_HOSTS") {
            Some(hosts) => {
                let endpoints: Vec<String> = hosts
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect();
                if endpoints.is_empty() {
                    return Err(ConfigError::InvalidValue("NDC_SOCKET_HOSTS", hosts));
                }
                endpoints
            }
            None => defaults.endpoints,
        };

        Ok(Self {
            endpoints,
            heartbeat_interval: parse_secs(&lookup, "NDC_HEARTBEAT_INTERVAL_SECS")?
                .unwrap_or(defaults.heartbeat_interval),
            reconnect_interval: parse_secs(&lookup, "NDC_RECONNECT_INTERVAL_SECS")?
                .unwrap_or(defaults.reconnect_interval),
            connect_timeout: parse_secs(&lookup, "NDC_CONNECT_TIMEOUT_SECS")?
                .unwrap_or(defaults.connect_timeout),
            write_timeout: parse_secs(&lookup, "NDC_WRITE_TIMEOUT_SECS")?
                .unwrap_or(defaults.write_timeout),
            socket_enabled: parse_bool(&lookup, "NDC_SOCKET_ENABLED")?
                .unwrap_or(defaults.socket_enabled),
            accept_invalid_certs: parse_bool(&lookup, "NDC_ACCEPT_INVALID_CERTS")?
                .unwrap_or(defaults.accept_invalid_certs),
            language: lookup("NDC_LANG").unwrap_or(defaults.language),
        })
    }
}

// Default value functions
fn default_endpoints() -> Vec<String> {
    (1..=4).map(|n| format!("wss://ws{n}.aminoapps.com")).collect()
}

fn default_heartbeat_secs() -> u64 {
    10
}

fn default_reconnect_secs() -> u64 {
    600
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_write_timeout_secs() -> u64 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

fn parse_secs<F>(lookup: &F, key: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Some(Duration::from_secs(secs))),
            _ => Err(ConfigError::InvalidValue(key, raw)),
        },
    }
}

fn parse_bool<F>(lookup: &F, key: &'static str) -> Result<Option<bool>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" => Ok(Some(false)),
            _ => Err(ConfigError::InvalidValue(key, raw)),
        },
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable holds an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from a key lookup
    ///
    /// # Errors
    /// Returns an error if a value is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = match lookup("APP_ENV") {
            Some(raw) => {
                Environment::parse(&raw).ok_or(ConfigError::InvalidValue("APP_ENV", raw))?
            }
            None => Environment::default(),
        };

        Ok(Self {
            env,
            socket: SocketConfig::from_lookup(lookup)?,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
