use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};

use crate::http::{SharedContext, error::AppError, handlers::non_empty};

#[derive(Deserialize)]
pub struct LoginQuery {
    pub scope: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub url: String,
}

pub async fn login(
    query: Result<Query<LoginQuery>, QueryRejection>,
    State(ctx): State<SharedContext>,
) -> Result<Json<LoginResponse>, AppError> {
    let Query(LoginQuery { scope }) = query?;
    let scope = non_empty(scope);
    let url = ctx.provider.generate_auth_url(scope.as_deref());
    Ok(Json(LoginResponse { url }))
}
