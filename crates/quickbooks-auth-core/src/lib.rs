//! Provider-neutral primitives for the OAuth2 authorization code flow.

pub mod provider;
pub mod types;

pub use provider::{Provider, ProviderError, ProviderErrorKind, ProviderResult};
pub use types::{DEFAULT_SCOPE, OAuthClientConfig, ProviderEndpoints, Revocation, TokenResponse};
