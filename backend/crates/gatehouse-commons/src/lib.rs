//! # gatehouse-commons
//!
//! Shared types and constants used across all Gatehouse crates
//! (gatehouse-store, gatehouse-auth, gatehouse-core, gatehouse-api).
//!
//! ## Models
//!
//! - `UserName`: normalized, validated username (the store key)
//! - `Role`: `user` or `admin`
//! - `UserStatus`: position of an applicant in the approval workflow
//! - `User`: the persisted user record
//!
//! ## Example Usage
//!
//! ```rust
//! use gatehouse_commons::{User, UserName, UserStatus};
//!
//! let username = UserName::parse("  Alice ").unwrap();
//! assert_eq!(username.as_str(), "alice");
//!
//! let user = User::new_applicant(username, "$2b$04$hash".to_string());
//! assert_eq!(user.status, UserStatus::PendingEvaluation);
//! assert!(!user.paid);
//! ```

pub mod constants;
pub mod errors;
pub mod models;

pub use constants::{AuthConstants, EvaluationConstants};
pub use errors::{CommonError, Result};
pub use models::{Role, User, UserName, UserStatus};
