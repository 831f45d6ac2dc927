use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::ChangePasswordOutcome;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

/// POST /Auth/change-password - verify the old password, then persist a
/// hash of the new one.
pub async fn change_password(
    State(state): State<AppState>,
    user: Option<Extension<AuthUser>>,
    Json(payload): Json<ChangePasswordRequest>,
) -> ApiResult<()> {
    let Some(Extension(user)) = user else {
        return Err(ApiError::unauthorized("Authentication required"));
    };

    let outcome = state
        .auth
        .change_password(
            user.id,
            payload.old_password.as_deref(),
            payload.new_password.as_deref(),
        )
        .await
        .map_err(|e| {
            tracing::error!("change password error: {}", e);
            ApiError::internal("Failed to change password", e)
        })?;

    match outcome {
        ChangePasswordOutcome::MissingFields => Err(ApiError::validation(
            "Old and new passwords are required",
            "Missing password fields",
        )),
        ChangePasswordOutcome::InvalidOldPassword => Err(ApiError::Authentication {
            message: "Current password is incorrect".to_string(),
            errors: vec!["Invalid old password".to_string()],
        }),
        ChangePasswordOutcome::Changed => {
            Ok(ApiResponse::message("Password changed successfully"))
        }
    }
}
