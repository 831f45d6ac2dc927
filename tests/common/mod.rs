use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use storefront_api::auth::password::{BcryptPassword, PasswordHasher};
use storefront_api::auth::JwtIssuer;
use storefront_api::database::models::{AdminUser, User};
use storefront_api::database::store::{CredentialStore, StoreError};
use storefront_api::services::AuthService;
use storefront_api::{app, AppState};

/// Low bcrypt cost keeps the suite fast; the flows only care about
/// match/mismatch, not work factor.
pub const TEST_BCRYPT_COST: u32 = 4;

/// In-memory credential store backing the in-process router.
#[derive(Default)]
pub struct FakeStore {
    users: Mutex<HashMap<Uuid, User>>,
    admins: Mutex<HashMap<Uuid, AdminUser>>,
}

impl FakeStore {
    pub async fn seed_user(&self, username: &str, email: &str, password: &str) -> Uuid {
        self.seed_user_full(username, email, password, false, None)
            .await
    }

    pub async fn seed_user_full(
        &self,
        username: &str,
        email: &str,
        password: &str,
        blocked: bool,
        role_name: Option<&str>,
    ) -> Uuid {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            email: email.to_string(),
            password: hash(password).await,
            confirmed: true,
            blocked,
            role_name: role_name.map(str::to_string),
            created_at: now,
            updated_at: now,
        };
        let id = user.id;
        self.users.lock().unwrap().insert(id, user);
        id
    }

    pub async fn seed_admin(&self, username: Option<&str>, email: &str, password: &str) -> Uuid {
        let now = Utc::now();
        let admin = AdminUser {
            id: Uuid::new_v4(),
            username: username.map(str::to_string),
            email: email.to_string(),
            password: hash(password).await,
            created_at: now,
            updated_at: now,
        };
        let id = admin.id;
        self.admins.lock().unwrap().insert(id, admin);
        id
    }

    pub fn stored_password(&self, id: Uuid) -> String {
        self.users.lock().unwrap()[&id].password.clone()
    }
}

async fn hash(password: &str) -> String {
    BcryptPassword::with_cost(TEST_BCRYPT_COST)
        .hash(password)
        .await
        .expect("bcrypt hash")
}

#[async_trait]
impl CredentialStore for FakeStore {
    async fn find_user_by_identifier(&self, identifier: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| {
                u.username.to_lowercase() == identifier || u.email.to_lowercase() == identifier
            })
            .cloned())
    }

    async fn find_admin_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<AdminUser>, StoreError> {
        Ok(self
            .admins
            .lock()
            .unwrap()
            .values()
            .find(|a| {
                a.username.as_deref().map(str::to_lowercase).as_deref() == Some(identifier)
                    || a.email.to_lowercase() == identifier
            })
            .cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_admin_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, StoreError> {
        Ok(self.admins.lock().unwrap().get(&id).cloned())
    }

    async fn update_user_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(&id)
            .ok_or_else(|| StoreError::NotFound(format!("user {}", id)))?;
        user.password = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(())
    }
}

/// Build the full router over a fake store, with real bcrypt comparison and
/// real JWT issuance/validation (development config secret).
pub fn test_app() -> (Router, Arc<FakeStore>) {
    let store = Arc::new(FakeStore::default());
    let bcrypt = Arc::new(BcryptPassword::with_cost(TEST_BCRYPT_COST));
    let auth = AuthService::new(
        store.clone(),
        bcrypt.clone(),
        bcrypt.clone(),
        bcrypt,
        Arc::new(JwtIssuer),
    );
    (app(AppState::new(Arc::new(auth))), store)
}

/// Fire one request at the in-process router and decode the JSON body.
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = router.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value: Value = serde_json::from_slice(&bytes)?;

    Ok((status, value))
}

/// Log in through the endpoint and return the issued token.
pub async fn login_for_token(router: &Router, username: &str, password: &str) -> Result<String> {
    let (status, body) = send(
        router,
        "POST",
        "/Auth/login",
        None,
        Some(serde_json::json!({ "username": username, "password": password })),
    )
    .await?;

    anyhow::ensure!(status == StatusCode::OK, "login failed: {}", body);
    Ok(body["data"]["token"].as_str().unwrap().to_string())
}
