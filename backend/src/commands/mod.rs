//! One-shot administrative commands run instead of the server.

mod create_admin;

pub use create_admin::create_admin;
