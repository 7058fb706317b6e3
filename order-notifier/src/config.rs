//! Configuration module for environment variable parsing.
//!
//! Transport settings are read fresh on every request: nothing here is cached
//! in process-wide state, so rotating SMTP credentials takes effect on the
//! next call without a restart.

use std::env;
use std::fmt;
use tracing::warn;

use crate::error::NotifyError;

/// Default SMTP submission port (STARTTLS).
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Default port for the web server.
pub const DEFAULT_HTTP_PORT: u16 = 8080;

/// Web server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Config {
            port: parse_or("PORT", lookup("PORT"), DEFAULT_HTTP_PORT),
        }
    }
}

/// SMTP relay settings as found in the environment.
///
/// Every field except the port is optional here; [`TransportConfig::into_transport`]
/// decides whether the set is complete enough for live delivery.
#[derive(Clone)]
pub struct TransportConfig {
    /// SMTP relay host (`SMTP_HOST`)
    pub host: Option<String>,

    /// SMTP relay port (`SMTP_PORT`)
    pub port: u16,

    /// SMTP login (`SMTP_USER`)
    pub username: Option<String>,

    /// SMTP password (`SMTP_PASSWORD`)
    pub password: Option<String>,

    /// Sender address (`FROM_EMAIL`), falls back to the username
    pub from_address: Option<String>,
}

impl TransportConfig {
    /// Load transport settings from environment variables.
    pub fn from_env() -> Result<Self, NotifyError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build transport settings from an arbitrary variable source.
    ///
    /// Empty values are treated the same as unset ones. A port that is set
    /// but not a number fails the request instead of silently using 587.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, NotifyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match var("SMTP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| NotifyError::InvalidConfig {
                    name: "SMTP_PORT",
                    value: raw,
                })?,
            None => DEFAULT_SMTP_PORT,
        };

        Ok(TransportConfig {
            host: var("SMTP_HOST"),
            port,
            username: var("SMTP_USER"),
            password: var("SMTP_PASSWORD"),
            from_address: var("FROM_EMAIL"),
        })
    }

    /// Resolve the settings into a delivery strategy.
    ///
    /// Host, username and password must all be present for live delivery;
    /// anything less selects demo mode.
    pub fn into_transport(self) -> Transport {
        match (self.host, self.username, self.password) {
            (Some(host), Some(username), Some(password)) => {
                let from_address = self.from_address.unwrap_or_else(|| username.clone());
                Transport::Live(SmtpSettings {
                    host,
                    port: self.port,
                    username,
                    password,
                    from_address,
                })
            }
            _ => Transport::Demo,
        }
    }
}

impl fmt::Debug for TransportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password_set", &self.password.is_some())
            .field("from_address", &self.from_address)
            .finish()
    }
}

/// How a composed notification leaves the process.
#[derive(Debug, Clone)]
pub enum Transport {
    /// No relay configured: acknowledge without any network I/O.
    Demo,
    /// Deliver through an authenticated SMTP relay.
    Live(SmtpSettings),
}

impl Transport {
    /// Short label for log fields.
    pub fn mode(&self) -> &'static str {
        match self {
            Transport::Demo => "demo",
            Transport::Live(_) => "live",
        }
    }
}

/// Complete SMTP relay settings.
#[derive(Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

impl fmt::Debug for SmtpSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmtpSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("from_address", &self.from_address)
            .finish()
    }
}

/// Parse a numeric variable, logging and falling back to the default when it is malformed.
fn parse_or<T: std::str::FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    let raw = match raw {
        Some(v) => v,
        None => return default,
    };

    match raw.trim().parse::<T>() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid numeric value, using default");
            default
        }
    }
}
