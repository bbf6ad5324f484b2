use std::{net::SocketAddr, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use quickbooks_auth_broker::{
    config::AppConfig,
    http::{self, AppContext},
    providers::GoogleProvider,
};
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    if let Err(error) = run().await {
        tracing::error!("broker shut down with error: {error:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;
    let provider = GoogleProvider::new(
        config.oauth.clone(),
        config.endpoints.clone(),
        config.http_timeout,
    )?;
    tracing::info!(
        auth_url = %config.endpoints.auth_url,
        token_url = %config.endpoints.token_url,
        "oauth provider configured"
    );

    let context = Arc::new(AppContext::new(Arc::new(provider)));
    let router: Router = http::router(context);

    let addr: SocketAddr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(?addr, "http server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
