use crate::middleware::response::ApiResponse;

/// POST /Auth/Logout - stateless acknowledgement. Tokens are not tracked
/// server-side; the client discards its copy.
pub async fn logout() -> ApiResponse<()> {
    ApiResponse::message("Logged out successfully")
}
