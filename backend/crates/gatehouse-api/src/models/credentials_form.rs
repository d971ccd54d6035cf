//! Register and login form bodies

use serde::{Deserialize, Deserializer};

/// Maximum username length accepted from a form (prevent memory exhaustion)
const MAX_USERNAME_FIELD_LENGTH: usize = 128;
/// Maximum password length accepted from a form; bcrypt itself stops at 72 bytes
const MAX_PASSWORD_FIELD_LENGTH: usize = 256;

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(deserialize_with = "validate_username_length")]
    pub username: String,
    #[serde(deserialize_with = "validate_password_length")]
    pub password: String,
    #[serde(deserialize_with = "validate_password_length")]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(deserialize_with = "validate_username_length")]
    pub username: String,
    #[serde(deserialize_with = "validate_password_length")]
    pub password: String,
}

pub(crate) fn validate_username_length<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.len() > MAX_USERNAME_FIELD_LENGTH {
        return Err(serde::de::Error::custom(format!(
            "username exceeds maximum length of {} characters",
            MAX_USERNAME_FIELD_LENGTH
        )));
    }
    Ok(s)
}

pub(crate) fn validate_password_length<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.len() > MAX_PASSWORD_FIELD_LENGTH {
        return Err(serde::de::Error::custom(format!(
            "password exceeds maximum length of {} characters",
            MAX_PASSWORD_FIELD_LENGTH
        )));
    }
    Ok(s)
}
