use std::{error::Error, fmt};

use async_trait::async_trait;

use crate::types::{Revocation, TokenResponse};

/// Convenience alias for provider interactions.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Operations of the OAuth2 authorization code flow against one provider.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Build the consent URL the user is sent to. `None` requests
    /// [`DEFAULT_SCOPE`](crate::DEFAULT_SCOPE).
    fn generate_auth_url(&self, scope: Option<&str>) -> String;
    /// Exchange an authorization code for tokens.
    async fn exchange_code_for_token(&self, code: &str) -> ProviderResult<TokenResponse>;
    /// Obtain a fresh access token from a refresh token.
    async fn refresh_token(&self, refresh_token: &str) -> ProviderResult<TokenResponse>;
    /// Revoke an access or refresh token.
    async fn revoke_token(&self, token: &str) -> ProviderResult<Revocation>;
}

/// Lightweight error type for provider implementers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    status: Option<u16>,
    message: Option<String>,
}

impl ProviderError {
    /// Create a new error for the given kind with an optional detail message.
    pub fn new(kind: ProviderErrorKind, message: impl Into<Option<String>>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
        }
    }

    /// The provider answered with `status` instead of 200.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ProviderErrorKind::Upstream,
            status: Some(status),
            message: Some(message.into()),
        }
    }

    pub fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    /// HTTP status returned by the provider, set for upstream rejections.
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.status, &self.message) {
            (Some(status), Some(message)) => write!(f, "{} ({status}): {message}", self.kind),
            (Some(status), None) => write!(f, "{} ({status})", self.kind),
            (None, Some(message)) => write!(f, "{}: {message}", self.kind),
            (None, None) => write!(f, "{}", self.kind),
        }
    }
}

impl Error for ProviderError {}

/// Classification of errors returned by providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Endpoint or credential configuration is unusable.
    Configuration,
    /// Provider responded with a non-200 status.
    Upstream,
    /// No response was received.
    Transport,
    /// Provider returned an unexpected payload.
    InvalidResponse,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderErrorKind::Configuration => "configuration error",
            ProviderErrorKind::Upstream => "upstream error",
            ProviderErrorKind::Transport => "transport error",
            ProviderErrorKind::InvalidResponse => "invalid response",
        };
        f.write_str(label)
    }
}
