//! chaingate-server — HTTP facade over [`RpcConnector`].
//!
//! # Routes
//! ```text
//! GET /                          service info
//! GET /favicon.ico               204
//! GET {prefix}/hello             greeting
//! GET {prefix}/status            connection state
//! GET {prefix}/block-number      eth_blockNumber
//! GET {prefix}/balance/:address  eth_getBalance (wei + ETH)
//! GET {prefix}/chain-id          eth_chainId
//! GET {prefix}/gas-price         eth_gasPrice (wei + Gwei)
//! ```
//!
//! Failed queries answer `{ "error", "kind" }` with 400 for invalid input and
//! 503 for everything else (see [`ApiError`]).

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use chaingate_core::RpcConnector;

pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

pub use config::{LogArgs, ServerConfig, UpstreamConfig};
pub use error::ApiError;
pub use telemetry::{init_tracing, LogConfig};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub connector: Arc<RpcConnector>,
    pub api_prefix: Arc<str>,
}

/// Normalise an API prefix to `/segment[/segment..]`, or `""` for root.
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Build the application router.
pub fn router(connector: Arc<RpcConnector>, api_prefix: &str) -> Router {
    let api_prefix = normalize_prefix(api_prefix);

    let api = Router::new()
        .route("/hello", get(routes::hello))
        .route("/status", get(routes::status))
        .route("/block-number", get(routes::block_number))
        .route("/balance/:address", get(routes::balance))
        .route("/chain-id", get(routes::chain_id))
        .route("/gas-price", get(routes::gas_price));

    let app = Router::new()
        .route("/", get(routes::root))
        .route("/favicon.ico", get(routes::favicon));

    // axum refuses to nest at the root
    let app = if api_prefix.is_empty() {
        app.merge(api)
    } else {
        app.nest(&api_prefix, api)
    };

    app.layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState {
            connector,
            api_prefix: api_prefix.into(),
        })
}

/// Bind `addr` and serve `app` until Ctrl-C.
pub async fn serve(addr: &str, app: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_normalisation() {
        assert_eq!(normalize_prefix("/api/v1"), "/api/v1");
        assert_eq!(normalize_prefix("api/v1/"), "/api/v1");
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix(""), "");
    }
}
