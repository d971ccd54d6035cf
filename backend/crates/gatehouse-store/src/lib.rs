//! Gatehouse user store
//!
//! Every user record lives in memory and is mirrored to a single JSON file
//! that is rewritten in full on each mutation.

pub mod error;
pub mod file_store;
pub mod user_repo;

pub use error::{StoreError, StoreResult};
pub use file_store::FileUserStore;
pub use user_repo::{UserChange, UserRepository};
