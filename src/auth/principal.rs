use uuid::Uuid;

use crate::database::models::{AdminUser, User};

/// Display role reported for administrative principals, unconditionally.
pub const ROLE_ADMIN: &str = "admin";

/// Fallback display role for regular users without a role name.
pub const ROLE_DEFAULT: &str = "authenticated";

/// The entity a login or token resolved to. The tag selects which store the
/// record came from and therefore which verification capability applies.
#[derive(Debug, Clone)]
pub enum Principal {
    Regular(User),
    Admin(AdminUser),
}

impl Principal {
    pub fn id(&self) -> Uuid {
        match self {
            Principal::Regular(user) => user.id,
            Principal::Admin(admin) => admin.id,
        }
    }

    pub fn password_hash(&self) -> &str {
        match self {
            Principal::Regular(user) => &user.password,
            Principal::Admin(admin) => &admin.password,
        }
    }

    /// Username as stored, falling back to the email when absent.
    pub fn username(&self) -> &str {
        match self {
            Principal::Regular(user) => {
                if user.username.is_empty() {
                    &user.email
                } else {
                    &user.username
                }
            }
            Principal::Admin(admin) => admin.username.as_deref().unwrap_or(&admin.email),
        }
    }

    pub fn email(&self) -> &str {
        match self {
            Principal::Regular(user) => &user.email,
            Principal::Admin(admin) => &admin.email,
        }
    }

    /// Display role: admin principals always report "admin"; regular users
    /// report their role's name or fall back to "authenticated".
    pub fn role(&self) -> &str {
        match self {
            Principal::Regular(user) => user.role_name.as_deref().unwrap_or(ROLE_DEFAULT),
            Principal::Admin(_) => ROLE_ADMIN,
        }
    }

    pub fn is_blocked(&self) -> bool {
        match self {
            // Administrative records carry no blocked flag.
            Principal::Regular(user) => user.blocked,
            Principal::Admin(_) => false,
        }
    }
}
