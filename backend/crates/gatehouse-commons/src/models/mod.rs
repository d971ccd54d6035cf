//! Domain models shared by every crate.
//!
//! `User` is the single persisted record type; do not define another user
//! model elsewhere.

mod role;
mod user;
mod user_name;
mod user_status;

pub use role::Role;
pub use user::User;
pub use user_name::UserName;
pub use user_status::UserStatus;
