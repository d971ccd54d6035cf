// Type-safe wrapper for usernames (the user store key)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::AuthConstants;
use crate::errors::{CommonError, Result};

/// Type-safe wrapper for usernames.
///
/// Usernames are stored lowercase so that `Alice` and `alice` collide on
/// registration. Use [`UserName::parse`] for untrusted input; [`UserName::new`]
/// only wraps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Wraps a string without validation.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Trims, lowercases and validates a username taken from a form.
    ///
    /// Allowed: 3 to 32 ASCII alphanumerics, `_`, `-` or `.`.
    pub fn parse(raw: &str) -> Result<Self> {
        let name = raw.trim().to_lowercase();

        if name.is_empty() {
            return Err(CommonError::invalid_input("Username is required"));
        }
        if name.len() < AuthConstants::MIN_USERNAME_LENGTH {
            return Err(CommonError::invalid_input(format!(
                "Username must be at least {} characters",
                AuthConstants::MIN_USERNAME_LENGTH
            )));
        }
        if name.len() > AuthConstants::MAX_USERNAME_LENGTH {
            return Err(CommonError::invalid_input(format!(
                "Username must be at most {} characters",
                AuthConstants::MAX_USERNAME_LENGTH
            )));
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(CommonError::invalid_input(
                "Username may only contain letters, digits, '_', '-' and '.'",
            ));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
