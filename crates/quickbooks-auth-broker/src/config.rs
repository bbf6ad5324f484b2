use std::{env, net::SocketAddr, time::Duration};

use quickbooks_auth_core::{OAuthClientConfig, ProviderEndpoints};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Settings resolved once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub oauth: OAuthClientConfig,
    pub endpoints: ProviderEndpoints,
    pub host: String,
    pub port: u16,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| match lookup(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(ConfigError::MissingEnv(key)),
        };
        let optional = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let oauth = OAuthClientConfig::new(
            required("CLIENT_ID")?,
            required("CLIENT_SECRET")?,
            required("REDIRECT_URI")?,
        );

        let defaults = ProviderEndpoints::google();
        let endpoints = ProviderEndpoints::new(
            optional("OAUTH_AUTH_URL").unwrap_or(defaults.auth_url),
            optional("OAUTH_TOKEN_URL").unwrap_or(defaults.token_url),
            optional("OAUTH_REVOKE_URL").unwrap_or(defaults.revoke_url),
        );

        let host = optional("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match optional("SERVER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                ConfigError::InvalidConfig(format!("SERVER_PORT `{raw}` is not a valid port"))
            })?,
            None => DEFAULT_PORT,
        };
        let timeout_secs = match optional("OAUTH_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ConfigError::InvalidConfig(format!(
                    "OAUTH_HTTP_TIMEOUT_SECS `{raw}` is not a whole number of seconds"
                ))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            oauth,
            endpoints,
            host,
            port,
            http_timeout: Duration::from_secs(timeout_secs.max(1)),
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                ConfigError::InvalidConfig(format!(
                    "`{}:{}` is not a valid bind address",
                    self.host, self.port
                ))
            })
    }
}
