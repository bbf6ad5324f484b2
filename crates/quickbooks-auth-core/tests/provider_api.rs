use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quickbooks_auth_core::{
    DEFAULT_SCOPE, Provider, ProviderError, ProviderErrorKind, ProviderResult, Revocation,
    TokenResponse,
};
use serde_json::json;

struct RecordingProvider {
    revoked: Arc<Mutex<Vec<String>>>,
}

impl RecordingProvider {
    fn new(store: Arc<Mutex<Vec<String>>>) -> Self {
        Self { revoked: store }
    }
}

#[async_trait]
impl Provider for RecordingProvider {
    fn generate_auth_url(&self, scope: Option<&str>) -> String {
        format!(
            "https://example.com/auth?scope={}",
            scope.unwrap_or(DEFAULT_SCOPE)
        )
    }

    async fn exchange_code_for_token(&self, code: &str) -> ProviderResult<TokenResponse> {
        if code == "bad" {
            return Err(ProviderError::upstream(400, "Failed to get token"));
        }
        let tokens = json!({"access_token": format!("access-{code}")});
        serde_json::from_value(tokens).map_err(|err| {
            ProviderError::new(ProviderErrorKind::InvalidResponse, err.to_string())
        })
    }

    async fn refresh_token(&self, _refresh_token: &str) -> ProviderResult<TokenResponse> {
        Err(ProviderError::new(
            ProviderErrorKind::Transport,
            "connection reset".to_string(),
        ))
    }

    async fn revoke_token(&self, token: &str) -> ProviderResult<Revocation> {
        self.revoked
            .lock()
            .expect("revoked lock")
            .push(token.to_string());
        Ok(Revocation::revoked())
    }
}

#[tokio::test]
async fn provider_is_usable_as_trait_object() {
    let store = Arc::new(Mutex::new(Vec::new()));
    let provider: Arc<dyn Provider> = Arc::new(RecordingProvider::new(store.clone()));

    assert_eq!(
        provider.generate_auth_url(None),
        "https://example.com/auth?scope=openid email profile"
    );

    let tokens = provider
        .exchange_code_for_token("abc")
        .await
        .expect("tokens");
    assert_eq!(tokens.get("access_token"), Some(&json!("access-abc")));

    let revocation = provider.revoke_token("tok").await.expect("revoke");
    assert_eq!(revocation, Revocation::revoked());
    assert_eq!(store.lock().unwrap().as_slice(), ["tok".to_string()]);
}

#[tokio::test]
async fn upstream_errors_carry_status_and_detail() {
    let provider = RecordingProvider::new(Arc::new(Mutex::new(Vec::new())));

    let err = provider
        .exchange_code_for_token("bad")
        .await
        .expect_err("should fail");
    assert_eq!(err.kind(), ProviderErrorKind::Upstream);
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.message(), Some("Failed to get token"));
    assert_eq!(err.to_string(), "upstream error (400): Failed to get token");

    let err = provider.refresh_token("r").await.expect_err("should fail");
    assert_eq!(err.kind(), ProviderErrorKind::Transport);
    assert_eq!(err.status(), None);
    assert_eq!(err.to_string(), "transport error: connection reset");
}
