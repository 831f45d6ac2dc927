mod change_password;
mod login;
mod logout;
mod verify;

pub use change_password::change_password;
pub use login::login;
pub use logout::logout;
pub use verify::verify;
