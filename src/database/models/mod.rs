pub mod admin;
pub mod user;

pub use admin::AdminUser;
pub use user::User;
