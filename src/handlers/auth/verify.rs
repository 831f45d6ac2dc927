use axum::Extension;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::services::SessionUser;

/// GET /Auth/verify - echo the authenticated principal. The middleware
/// attaches the principal; if it is somehow absent this is a 401, not a 500.
pub async fn verify(user: Option<Extension<AuthUser>>) -> ApiResult<SessionUser> {
    match user {
        Some(Extension(user)) => Ok(ApiResponse::success(
            "Token is valid",
            SessionUser {
                id: user.id.to_string(),
                username: user.username,
                role: user.role,
                email: user.email,
            },
        )),
        None => Err(ApiError::unauthorized("Invalid or expired token")),
    }
}
