mod command;
mod user;

pub use command::*;
pub use user::*;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:///users.db";
