pub mod password;
pub mod principal;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;

/// Claims embedded in a session token. Stateless: the id is the only
/// durable reference, everything else is re-resolved per request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(id: Uuid) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            id,
            exp,
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("token generation error: {0}")]
    Generation(String),

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("JWT secret not configured")]
    MissingSecret,
}

/// Capability for minting session tokens. Injected into the auth service so
/// the login flow can be exercised without a real signing key.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, user_id: Uuid) -> Result<String, TokenError>;
}

/// Production issuer backed by jsonwebtoken, HS256 with the configured secret.
#[derive(Debug, Default)]
pub struct JwtIssuer;

impl TokenIssuer for JwtIssuer {
    fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let secret = &config::config().security.jwt_secret;

        if secret.is_empty() {
            return Err(TokenError::MissingSecret);
        }

        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let header = Header::default();

        encode(&header, &Claims::new(user_id), &encoding_key)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }
}

/// Validate a bearer token and extract its claims.
pub fn validate_token(token: &str) -> Result<Claims, TokenError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(TokenError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &decoding_key, &validation)
        .map_err(|e| TokenError::Invalid(e.to_string()))?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips() {
        let id = Uuid::new_v4();
        let token = JwtIssuer.issue(id).expect("issue");
        assert!(!token.is_empty());

        let claims = validate_token(&token).expect("validate");
        assert_eq!(claims.id, id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = JwtIssuer.issue(Uuid::new_v4()).expect("issue");
        let mut tampered = token.clone();
        tampered.pop();
        assert!(validate_token(&tampered).is_err());
    }
}
