use anyhow::Context;

use crate::auth::password::{BcryptPassword, PasswordHasher};
use crate::config;
use crate::database::store::{CredentialStore, SqlxCredentialStore};

/// Seed the configured admin account if no matching record exists.
///
/// Idempotent: checked by username and by email before inserting, so
/// repeated startups leave an existing account untouched.
pub async fn seed_admin_user() -> anyhow::Result<()> {
    let seed = &config::config().admin_seed;
    let store = SqlxCredentialStore;

    let username = seed.username.to_lowercase();
    let email = seed.email.to_lowercase();

    let existing = match store.find_admin_by_identifier(&username).await? {
        Some(admin) => Some(admin),
        None => store.find_admin_by_identifier(&email).await?,
    };

    if let Some(admin) = existing {
        tracing::info!("admin account already present: {}", admin.email);
        return Ok(());
    }

    let hash = BcryptPassword::new()
        .hash(&seed.password)
        .await
        .context("hashing admin seed password")?;

    let admin = store
        .create_admin(&seed.username, &seed.email, &hash)
        .await
        .context("inserting admin seed account")?;

    tracing::info!("seeded admin account {} ({})", admin.email, admin.id);
    Ok(())
}
