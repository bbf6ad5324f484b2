use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use quickbooks_auth_core::{Revocation, TokenResponse};
use serde::{Deserialize, Serialize};

use crate::http::{SharedContext, error::AppError, handlers::non_empty};

#[derive(Debug, Serialize)]
pub struct TokensResponse {
    pub tokens: TokenResponse,
}

#[derive(Deserialize)]
pub struct RefreshQuery {
    pub refresh_token: Option<String>,
}

#[derive(Deserialize)]
pub struct RevokeQuery {
    pub token: Option<String>,
}

pub async fn refresh_token(
    query: Result<Query<RefreshQuery>, QueryRejection>,
    State(ctx): State<SharedContext>,
) -> Result<Json<TokensResponse>, AppError> {
    let Query(RefreshQuery { refresh_token }) = query?;
    let refresh_token = non_empty(refresh_token)
        .ok_or_else(|| AppError::bad_request("refresh_token not provided"))?;

    let tokens = ctx
        .provider
        .refresh_token(&refresh_token)
        .await
        .inspect_err(|err| tracing::warn!(error = %err, "token refresh failed"))?;

    Ok(Json(TokensResponse { tokens }))
}

pub async fn revoke_token(
    query: Result<Query<RevokeQuery>, QueryRejection>,
    State(ctx): State<SharedContext>,
) -> Result<Json<Revocation>, AppError> {
    let Query(RevokeQuery { token }) = query?;
    let token = non_empty(token).ok_or_else(|| AppError::bad_request("token not provided"))?;

    let revocation = ctx
        .provider
        .revoke_token(&token)
        .await
        .inspect_err(|err| tracing::warn!(error = %err, "token revocation failed"))?;

    Ok(Json(revocation))
}
