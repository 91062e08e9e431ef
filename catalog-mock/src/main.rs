//! catalog-mock - local stand-in for the catalog backend

use catalog_mock::{DEFAULT_PASS, DEFAULT_USER, MockState, router};
use std::sync::Arc;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_mock=info,tower_http=info".into()),
        )
        .init();

    let port: u16 = std::env::var("MOCK_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(4000);
    let user = std::env::var("MOCK_ADMIN_USER").unwrap_or_else(|_| DEFAULT_USER.into());
    let pass = std::env::var("MOCK_ADMIN_PASS").unwrap_or_else(|_| DEFAULT_PASS.into());

    let state = Arc::new(MockState::seeded(user, pass));
    let app = router(state);

    let addr = format!("127.0.0.1:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("catalog-mock listening on {addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
