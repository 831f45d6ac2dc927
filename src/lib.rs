pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod services;

use std::sync::Arc;

use axum::{routing::get, routing::post, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::services::AuthService;

/// Shared application state handed to handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}

/// Build the full router. Tests call this with fake capabilities wired into
/// the state; `main` wires the sqlx/bcrypt/JWT production set.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes(state.clone()))
        .merge(auth_protected_routes(state))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_public_routes(state: AppState) -> Router {
    use handlers::auth;

    Router::new()
        .route("/Auth/login", post(auth::login))
        .with_state(state)
}

fn auth_protected_routes(state: AppState) -> Router {
    use handlers::auth;

    // Route casing follows the storefront clients already in the field.
    Router::new()
        .route("/Auth/Logout", post(auth::logout))
        .route("/Auth/verify", get(auth::verify))
        .route("/Auth/change-password", post(auth::change_password))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::jwt_auth_middleware,
        ))
        .with_state(state)
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "success": true,
        "data": {
            "name": "Storefront CMS Auth API",
            "version": version,
            "description": "Authentication backend for a headless e-commerce CMS",
            "endpoints": {
                "home": "/ (public)",
                "login": "POST /Auth/login (public - token acquisition)",
                "logout": "POST /Auth/Logout (authenticated)",
                "verify": "GET /Auth/verify (authenticated)",
                "change_password": "POST /Auth/change-password (authenticated)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match crate::database::manager::DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "success": false,
                "message": "database unavailable",
                "errors": [e.to_string()],
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                }
            })),
        ),
    }
}
