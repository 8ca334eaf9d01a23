//! HTTP interaction layer.
//!
//! This module provides:
//! - The axum router and handlers (`service`)
//! - Wire types and error-to-response mapping (`response`)
//!
//! Requests are form-encoded, responses are JSON. Recoverable errors are
//! answered with `303 See Other` pointing at the step the user should
//! return to; see [`response::ApiError`].

pub mod response;
pub mod service;

pub use response::ApiError;
pub use service::{AppState, router};

use std::net::SocketAddr;

use tracing::info;

use crate::Result;

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown requested");
    }
}
