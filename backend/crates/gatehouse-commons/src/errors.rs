//! Shared error types for Gatehouse.
//!
//! ```rust
//! use gatehouse_commons::errors::{CommonError, Result};
//!
//! fn validate(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(CommonError::invalid_input("Username cannot be empty"));
//!     }
//!     Ok(())
//! }
//! ```

use std::fmt;

/// Common error type for Gatehouse operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// Invalid input provided to a function
    InvalidInput(String),
}

impl CommonError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// The message without the category prefix, suitable for showing to a user.
    pub fn message(&self) -> &str {
        match self {
            CommonError::InvalidInput(msg) => msg,
        }
    }
}

impl fmt::Display for CommonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommonError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for CommonError {}

/// Result type alias using CommonError.
pub type Result<T> = std::result::Result<T, CommonError>;
