use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::principal::Principal;
use crate::auth::validate_token;
use crate::error::ApiError;
use crate::AppState;

/// Authenticated principal context attached to the request after token
/// validation. A projection only: the password hash never travels with it.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
    pub role: String,
    pub email: String,
}

impl From<&Principal> for AuthUser {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id(),
            username: principal.username().to_string(),
            role: principal.role().to_string(),
            email: principal.email().to_string(),
        }
    }
}

/// Token-validation middleware: extracts the bearer token, validates it, and
/// resolves the embedded id against the credential stores. Any failure along
/// the way is a 401; no principal ever reaches a handler unauthenticated.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(ApiError::unauthorized)?;

    let claims =
        validate_token(&token).map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    let principal = state
        .auth
        .resolve_principal(claims.id)
        .await
        .map_err(|e| {
            tracing::error!("principal resolution failed: {}", e);
            ApiError::unauthorized("Invalid or expired token")
        })?
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;

    request.extensions_mut().insert(AuthUser::from(&principal));

    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty bearer token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_extraction() {
        let mut headers = HeaderMap::new();
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");

        headers.insert("authorization", "Basic abc".parse().unwrap());
        assert!(extract_bearer_token(&headers).is_err());

        headers.insert("authorization", "Bearer  ".parse().unwrap());
        assert!(extract_bearer_token(&headers).is_err());
    }
}
