use std::net::SocketAddr;
use std::sync::Arc;

use talk_server::catalog::Catalog;
use talk_server::upstream::{DharmaClient, DharmaConfig};
use talk_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "talk_server=info".into()),
        )
        .init();

    let mut config = DharmaConfig::new();
    if let Ok(base_url) = std::env::var("UPSTREAM_BASE_URL") {
        config = config.with_base_url(base_url);
    }

    let client = DharmaClient::new(config).expect("Failed to create upstream client");
    let state = AppState::new(Catalog::new(Arc::new(client)));

    let app = create_router(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!("talk server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
