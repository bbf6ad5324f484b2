use std::fmt;

use axum::{
    Json,
    http::{HeaderMap, Uri, header},
};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Scheme, host and port the server believes it was reached at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOrigin {
    pub scheme: String,
    pub host: String,
    pub port: u16,
}

impl ServerOrigin {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
        }
    }

    /// Resolves the origin from the request target, falling back to the
    /// `X-Forwarded-Proto` and `Host` headers for origin-form targets.
    pub fn from_request(uri: &Uri, headers: &HeaderMap) -> Self {
        let scheme = uri
            .scheme_str()
            .map(str::to_ascii_lowercase)
            .or_else(|| forwarded_proto(headers))
            .unwrap_or_else(|| "http".to_string());

        let authority = uri.authority().cloned().or_else(|| {
            headers
                .get(header::HOST)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse().ok())
        });

        let host = authority
            .as_ref()
            .map(|authority| authority.host().to_string())
            .filter(|host| !host.is_empty())
            .unwrap_or_else(|| "localhost".to_string());
        let port = authority
            .as_ref()
            .and_then(|authority| authority.port_u16())
            .unwrap_or_else(|| default_port(&scheme));

        Self::new(scheme, host, port)
    }
}

impl fmt::Display for ServerOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Server is running at {}://{}:{}",
            self.scheme, self.host, self.port
        )
    }
}

fn forwarded_proto(headers: &HeaderMap) -> Option<String> {
    headers
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_ascii_lowercase())
        .filter(|value| !value.is_empty())
}

fn default_port(scheme: &str) -> u16 {
    if scheme == "https" { 443 } else { 80 }
}

pub async fn get_status(uri: Uri, headers: HeaderMap) -> Json<String> {
    Json(ServerOrigin::from_request(&uri, &headers).to_string())
}
