pub mod error;
pub mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::Request,
    routing::{get, post},
};
use quickbooks_auth_core::Provider;
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{Level, Span};

/// Dependencies shared by every request handler.
#[derive(Clone)]
pub struct AppContext {
    pub provider: Arc<dyn Provider>,
}

impl AppContext {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }
}

pub type SharedContext = Arc<AppContext>;

pub fn router(context: SharedContext) -> Router {
    Router::new()
        .route("/", get(handlers::status::get_status))
        .nest("/quickbooks/auth", auth_routes())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(context)
}

/// Query strings carry codes and tokens, so only the path is recorded.
fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path()
    )
}

fn auth_routes() -> Router<SharedContext> {
    Router::new()
        .route("/login", get(handlers::login::login))
        .route("/callback", get(handlers::callback::complete))
        .route("/refresh-token", get(handlers::token::refresh_token))
        .route("/revoke-token", post(handlers::token::revoke_token))
}
