use axum::{extract::State, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::{LoginOutcome, LoginSession};
use crate::AppState;

/// Fields are optional so a missing one becomes a 400 envelope rather than
/// an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /Auth/login - authenticate with username/email and password,
/// receive a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<LoginSession> {
    let outcome = state
        .auth
        .login(payload.username.as_deref(), payload.password.as_deref())
        .await
        .map_err(|e| {
            tracing::error!("login error: {}", e);
            ApiError::internal("An error occurred during login", e)
        })?;

    match outcome {
        LoginOutcome::MissingCredentials => Err(ApiError::validation(
            "Username and password are required",
            "Missing credentials",
        )),
        // One body for both, so the caller cannot tell which happened
        LoginOutcome::UserNotFound | LoginOutcome::InvalidPassword => {
            Err(ApiError::invalid_credentials())
        }
        LoginOutcome::AccountBlocked => Err(ApiError::account_blocked()),
        LoginOutcome::Success(session) => Ok(ApiResponse::success("Login successful", session)),
    }
}
