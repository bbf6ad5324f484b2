use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;

use crate::http::{
    SharedContext,
    error::AppError,
    handlers::{non_empty, token::TokensResponse},
};

#[derive(Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
}

pub async fn complete(
    query: Result<Query<CallbackQuery>, QueryRejection>,
    State(ctx): State<SharedContext>,
) -> Result<Json<TokensResponse>, AppError> {
    let Query(CallbackQuery { code }) = query?;
    let Some(code) = non_empty(code) else {
        tracing::info!(reason = "missing_code", "callback rejected");
        return Err(AppError::bad_request("Code not provided"));
    };

    let tokens = ctx
        .provider
        .exchange_code_for_token(&code)
        .await
        .inspect_err(|err| tracing::warn!(error = %err, "authorization code exchange failed"))?;

    Ok(Json(TokensResponse { tokens }))
}
