// Password hashing and validation module

use crate::error::{AuthError, AuthResult};
use bcrypt::{hash, verify, DEFAULT_COST};
use std::collections::HashSet;
use std::sync::OnceLock;

/// Bcrypt cost factor used when none is configured.
pub const BCRYPT_COST: u32 = DEFAULT_COST;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (bcrypt has a 72-byte limit)
pub const MAX_PASSWORD_LENGTH: usize = 72;

static COMMON_PASSWORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();

/// Hash a password using bcrypt.
///
/// Runs on the blocking thread pool so request workers are not stalled.
///
/// # Errors
/// Returns `AuthError::HashingError` if bcrypt fails
pub async fn hash_password(password: &str, cost: Option<u32>) -> AuthResult<String> {
    let password = password.to_string();
    let cost = cost.unwrap_or(BCRYPT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("Task join error: {}", e)))?
}

/// Verify a password against a bcrypt hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the hash itself is
/// unusable.
pub async fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hash).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("Task join error: {}", e)))?
}

/// Validate password meets the registration rules.
///
/// Checks:
/// - Minimum length (8 bytes)
/// - Maximum length (72 bytes for bcrypt)
/// - Not in the common passwords list
///
/// # Errors
/// Returns `AuthError::WeakPassword` with the reason
pub fn validate_password(password: &str) -> AuthResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at most {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }

    if is_common_password(password) {
        return Err(AuthError::WeakPassword("Password is too common".to_string()));
    }

    Ok(())
}

fn is_common_password(password: &str) -> bool {
    let common_passwords = COMMON_PASSWORDS.get_or_init(|| {
        [
            "password", "123456", "12345678", "123456789", "qwerty", "abc123", "monkey",
            "1234567", "letmein", "trustno1", "dragon", "baseball", "iloveyou", "master",
            "sunshine", "passw0rd", "shadow", "superman", "football", "password1", "qwerty123",
        ]
        .into_iter()
        .collect()
    });

    common_passwords.contains(password.to_lowercase().as_str())
}
