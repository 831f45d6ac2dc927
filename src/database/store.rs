use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::manager::{DatabaseManager, DatabaseError};
use super::models::{AdminUser, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Queryable collection of user records, regular and administrative.
///
/// Injected into the auth service so flows can be exercised against an
/// in-memory fake. Identifier lookups expect an already lower-cased value
/// and match against username OR email.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_user_by_identifier(&self, identifier: &str)
        -> Result<Option<User>, StoreError>;

    async fn find_admin_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<AdminUser>, StoreError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_admin_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, StoreError>;

    async fn update_user_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), StoreError>;
}

const USER_COLUMNS: &str = "u.id, u.username, u.email, u.password, u.confirmed, u.blocked, \
     r.name AS role_name, u.created_at, u.updated_at";

/// Postgres-backed credential store.
pub struct SqlxCredentialStore;

impl SqlxCredentialStore {
    /// Insert an administrative record. Used by the startup admin seed.
    pub async fn create_admin(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<AdminUser, StoreError> {
        let pool = DatabaseManager::pool().await?;

        let admin = sqlx::query_as::<_, AdminUser>(
            "INSERT INTO admin_users (id, username, email, password, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, NOW(), NOW()) \
             RETURNING id, username, email, password, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&pool)
        .await?;

        Ok(admin)
    }
}

#[async_trait]
impl CredentialStore for SqlxCredentialStore {
    async fn find_user_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<User>, StoreError> {
        let pool = DatabaseManager::pool().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u \
             LEFT JOIN roles r ON r.id = u.role_id \
             WHERE LOWER(u.username) = $1 OR LOWER(u.email) = $1",
        ))
        .bind(identifier)
        .fetch_optional(&pool)
        .await?;

        Ok(user)
    }

    async fn find_admin_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<AdminUser>, StoreError> {
        let pool = DatabaseManager::pool().await?;

        let admin = sqlx::query_as::<_, AdminUser>(
            "SELECT id, username, email, password, created_at, updated_at \
             FROM admin_users \
             WHERE LOWER(username) = $1 OR LOWER(email) = $1",
        )
        .bind(identifier)
        .fetch_optional(&pool)
        .await?;

        Ok(admin)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let pool = DatabaseManager::pool().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users u \
             LEFT JOIN roles r ON r.id = u.role_id \
             WHERE u.id = $1",
        ))
        .bind(id)
        .fetch_optional(&pool)
        .await?;

        Ok(user)
    }

    async fn find_admin_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, StoreError> {
        let pool = DatabaseManager::pool().await?;

        let admin = sqlx::query_as::<_, AdminUser>(
            "SELECT id, username, email, password, created_at, updated_at \
             FROM admin_users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&pool)
        .await?;

        Ok(admin)
    }

    async fn update_user_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), StoreError> {
        let pool = DatabaseManager::pool().await?;

        let result = sqlx::query("UPDATE users SET password = $1, updated_at = NOW() WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(&pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("user {}", id)));
        }

        Ok(())
    }
}
