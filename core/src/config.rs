//! Connection settings for a [`DnsClient`](crate::DnsClient).
//!
//! The token is percent-encoded once, when it enters the config, and is
//! appended to query strings as-is afterwards.

use std::time::Duration;

use crate::error::ConfigError;

/// Production API host.
pub const PRODUCTION_HOST: &str = "www.dns.com";

/// Sandbox host for development and testing. Serves plain HTTP.
pub const SANDBOX_HOST: &str = "sandbox.dns.com";

pub const ENV_HOST: &str = "DNSAPI_HOST";
pub const ENV_TOKEN: &str = "DNSAPI_TOKEN";
pub const ENV_USE_TLS: &str = "DNSAPI_USE_TLS";
pub const ENV_TIMEOUT_SECS: &str = "DNSAPI_TIMEOUT_SECS";

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    host: String,
    use_tls: bool,
    token: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, use_tls: bool, token: &str) -> Self {
        Self {
            host: host.into(),
            use_tls,
            token: encode_token(token),
            timeout: None,
        }
    }

    pub fn production(token: &str) -> Self {
        Self::new(PRODUCTION_HOST, true, token)
    }

    pub fn sandbox(token: &str) -> Self {
        Self::new(SANDBOX_HOST, false, token)
    }

    /// Load settings from `DNSAPI_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup(ENV_HOST).ok_or(ConfigError::Missing(ENV_HOST))?;
        let token = lookup(ENV_TOKEN).ok_or(ConfigError::Missing(ENV_TOKEN))?;

        let use_tls = match lookup(ENV_USE_TLS) {
            None => true,
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: ENV_USE_TLS,
                value,
            })?,
        };

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            None => None,
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    return Err(ConfigError::Invalid {
                        name: ENV_TIMEOUT_SECS,
                        value,
                    })
                }
            },
        };

        let mut config = Self::new(host, use_tls, &token);
        config.set_timeout(timeout);
        Ok(config)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn use_tls(&self) -> bool {
        self.use_tls
    }

    /// The token in its percent-encoded form.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn scheme(&self) -> &'static str {
        if self.use_tls {
            "https"
        } else {
            "http"
        }
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    pub fn set_tls(&mut self, use_tls: bool) {
        self.use_tls = use_tls;
    }

    /// Replace the token. The new value is encoded like the one given to `new`.
    pub fn set_token(&mut self, token: &str) {
        self.token = encode_token(token);
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("host", &self.host)
            .field("use_tls", &self.use_tls)
            .field("token", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn encode_token(token: &str) -> String {
    urlencoding::encode(token).into_owned()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
