use std::sync::Arc;

use storefront_api::{app, bootstrap, config, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Storefront Auth API in {:?} mode", config.environment);

    let state = AppState::new(Arc::new(storefront_api::services::AuthService::with_defaults()));

    // Seed the admin account if it is missing. A failure here (e.g. database
    // not reachable yet) must not keep the server from starting.
    if let Err(e) = bootstrap::seed_admin_user().await {
        tracing::warn!("admin seed skipped: {}", e);
    }

    let router = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("STOREFRONT_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Storefront Auth API listening on http://{}", bind_addr);

    axum::serve(listener, router).await.expect("server");
}
