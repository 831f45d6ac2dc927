// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-facing envelope.
///
/// Every failure response carries `success: false`, a `message`, and an
/// `errors` array with at least one entry.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request - missing or malformed request fields
    Validation { message: String, errors: Vec<String> },

    // 400 Bad Request - credential failures (unknown user, wrong password,
    // blocked account). Unknown-user and wrong-password share one body so
    // the response never reveals which one happened.
    Authentication { message: String, errors: Vec<String> },

    // 401 Unauthorized - missing or invalid session token
    Authorization { message: String, errors: Vec<String> },

    // 500 Internal Server Error - unexpected collaborator failure
    Internal { message: String, errors: Vec<String> },
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation { .. } => 400,
            ApiError::Authentication { .. } => 400,
            ApiError::Authorization { .. } => 401,
            ApiError::Internal { .. } => 500,
        }
    }

    /// Get client-facing error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation { message, .. } => message,
            ApiError::Authentication { message, .. } => message,
            ApiError::Authorization { message, .. } => message,
            ApiError::Internal { message, .. } => message,
        }
    }

    fn errors(&self) -> &[String] {
        match self {
            ApiError::Validation { errors, .. } => errors,
            ApiError::Authentication { errors, .. } => errors,
            ApiError::Authorization { errors, .. } => errors,
            ApiError::Internal { errors, .. } => errors,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "message": self.message(),
            "errors": self.errors(),
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation(message: impl Into<String>, error: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            errors: vec![error.into()],
        }
    }

    /// The single body used for both unknown-identifier and wrong-password
    /// failures (enumeration resistance).
    pub fn invalid_credentials() -> Self {
        ApiError::Authentication {
            message: "Invalid username or password".to_string(),
            errors: vec!["Invalid credentials".to_string()],
        }
    }

    pub fn account_blocked() -> Self {
        ApiError::Authentication {
            message: "Your account has been blocked".to_string(),
            errors: vec!["Account blocked".to_string()],
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        let message = message.into();
        ApiError::Authorization {
            errors: vec![message.clone()],
            message,
        }
    }

    pub fn internal(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        ApiError::Internal {
            message: message.into(),
            errors: vec![cause.to_string()],
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_failures_share_one_body() {
        // UserNotFound and InvalidPassword both map through this constructor,
        // so the serialized bodies are byte-identical by construction.
        let a = ApiError::invalid_credentials().to_json();
        let b = ApiError::invalid_credentials().to_json();
        assert_eq!(a, b);
        assert_eq!(a["message"], "Invalid username or password");
    }

    #[test]
    fn failure_envelope_always_has_errors() {
        for err in [
            ApiError::validation("Username and password are required", "Missing credentials"),
            ApiError::invalid_credentials(),
            ApiError::account_blocked(),
            ApiError::unauthorized("Invalid or expired token"),
            ApiError::internal("An error occurred during login", "pool timed out"),
        ] {
            let body = err.to_json();
            assert_eq!(body["success"], false);
            assert!(!body["errors"].as_array().unwrap().is_empty());
        }
    }
}
