//! Catalog Mock - in-memory catalog backend
//!
//! Serves the public, admin and upload endpoints over seeded vehicles and
//! plans, and records every request so tests can assert on the traffic.

mod api;
mod error;
mod state;

pub use api::router;
pub use error::{ApiError, ApiResult};
pub use state::{MockState, RecordedRequest, StoredUpload};

use std::net::SocketAddr;
use std::sync::Arc;

/// Default admin account
pub const DEFAULT_USER: &str = "admin";
pub const DEFAULT_PASS: &str = "admin123";

/// Serve `state` on `addr` in a background task; returns the bound address
pub async fn spawn_on(state: Arc<MockState>, addr: &str) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    let app = router(state);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("mock server error: {e}");
        }
    });
    tracing::debug!("catalog mock listening on {local}");
    Ok(local)
}

/// Serve on an ephemeral localhost port
pub async fn spawn(state: Arc<MockState>) -> std::io::Result<SocketAddr> {
    spawn_on(state, "127.0.0.1:0").await
}
