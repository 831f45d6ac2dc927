use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::password::{
    PasswordError, PasswordHasher, PasswordVerifier, ABSENT_RECORD_HASH,
};
use crate::auth::principal::Principal;
use crate::auth::{TokenError, TokenIssuer};
use crate::database::store::{CredentialStore, StoreError};

/// Unexpected collaborator failure during a flow. Surfaces as HTTP 500.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// User projection returned with a successful login or verify call.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    pub role: String,
    pub email: String,
}

impl From<&Principal> for SessionUser {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id().to_string(),
            username: principal.username().to_string(),
            role: principal.role().to_string(),
            email: principal.email().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginSession {
    pub token: String,
    pub user: SessionUser,
}

/// Decision outcome of the login flow. The HTTP adapter translates these;
/// UserNotFound and InvalidPassword stay distinct here for logging and tests
/// but map to one indistinguishable response body.
#[derive(Debug)]
pub enum LoginOutcome {
    MissingCredentials,
    UserNotFound,
    InvalidPassword,
    AccountBlocked,
    Success(LoginSession),
}

#[derive(Debug, PartialEq)]
pub enum ChangePasswordOutcome {
    MissingFields,
    InvalidOldPassword,
    Changed,
}

/// Orchestrates lookup, verification, status checks, and token issuance over
/// injected capabilities, so every flow is testable with fakes.
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    user_verifier: Arc<dyn PasswordVerifier>,
    admin_verifier: Arc<dyn PasswordVerifier>,
    hasher: Arc<dyn PasswordHasher>,
    issuer: Arc<dyn TokenIssuer>,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        user_verifier: Arc<dyn PasswordVerifier>,
        admin_verifier: Arc<dyn PasswordVerifier>,
        hasher: Arc<dyn PasswordHasher>,
        issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            store,
            user_verifier,
            admin_verifier,
            hasher,
            issuer,
        }
    }

    /// Production wiring: sqlx store, bcrypt for both record kinds, JWT issuer.
    pub fn with_defaults() -> Self {
        let bcrypt = Arc::new(crate::auth::password::BcryptPassword::new());
        Self::new(
            Arc::new(crate::database::store::SqlxCredentialStore),
            bcrypt.clone(),
            bcrypt.clone(),
            bcrypt,
            Arc::new(crate::auth::JwtIssuer),
        )
    }

    /// Login flow. Lookup order is regular store first, then the
    /// administrative store; the blocked check runs strictly after password
    /// verification so a blocked user with a wrong password sees the same
    /// failure as anyone else.
    pub async fn login(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<LoginOutcome, AuthError> {
        let (username, password) = match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
            _ => return Ok(LoginOutcome::MissingCredentials),
        };

        // Identifier may be a username or an email; matching is case-insensitive.
        let identifier = username.to_lowercase();
        tracing::info!("login attempt for {}", identifier);

        let principal = match self.store.find_user_by_identifier(&identifier).await? {
            Some(user) => Principal::Regular(user),
            None => match self.store.find_admin_by_identifier(&identifier).await? {
                Some(admin) => Principal::Admin(admin),
                None => {
                    // Burn a comparison against a fixed hash so an absent
                    // record costs the same as a present one.
                    let _ = self
                        .user_verifier
                        .verify(password, ABSENT_RECORD_HASH)
                        .await?;
                    return Ok(LoginOutcome::UserNotFound);
                }
            },
        };

        let verifier = match &principal {
            Principal::Regular(_) => &self.user_verifier,
            Principal::Admin(_) => &self.admin_verifier,
        };

        if !verifier.verify(password, principal.password_hash()).await? {
            return Ok(LoginOutcome::InvalidPassword);
        }

        if principal.is_blocked() {
            tracing::warn!("blocked account attempted login: {}", identifier);
            return Ok(LoginOutcome::AccountBlocked);
        }

        let token = self.issuer.issue(principal.id())?;

        Ok(LoginOutcome::Success(LoginSession {
            token,
            user: SessionUser::from(&principal),
        }))
    }

    /// Resolve the principal behind a validated token id. Regular store
    /// first, then the administrative store.
    pub async fn resolve_principal(&self, id: Uuid) -> Result<Option<Principal>, AuthError> {
        if let Some(user) = self.store.find_user_by_id(id).await? {
            return Ok(Some(Principal::Regular(user)));
        }
        if let Some(admin) = self.store.find_admin_by_id(id).await? {
            return Ok(Some(Principal::Admin(admin)));
        }
        Ok(None)
    }

    /// Password change flow for an authenticated principal.
    ///
    /// Only the regular-user store and capabilities are consulted: the
    /// record is re-fetched by id to obtain the stored hash (the request
    /// principal projection does not carry it). An administrative principal
    /// therefore fails with a store error rather than rotating anything,
    /// matching the asymmetry of the system this replaces.
    pub async fn change_password(
        &self,
        principal_id: Uuid,
        old_password: Option<&str>,
        new_password: Option<&str>,
    ) -> Result<ChangePasswordOutcome, AuthError> {
        let (old_password, new_password) = match (old_password, new_password) {
            (Some(o), Some(n)) if !o.is_empty() && !n.is_empty() => (o, n),
            _ => return Ok(ChangePasswordOutcome::MissingFields),
        };

        let user = self
            .store
            .find_user_by_id(principal_id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("user {}", principal_id)))?;

        if !self.user_verifier.verify(old_password, &user.password).await? {
            return Ok(ChangePasswordOutcome::InvalidOldPassword);
        }

        let new_hash = self.hasher.hash(new_password).await?;
        self.store
            .update_user_password(user.id, &new_hash)
            .await?;

        tracing::info!("password changed for user {}", user.id);
        Ok(ChangePasswordOutcome::Changed)
    }
}
