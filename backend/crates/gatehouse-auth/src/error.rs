use thiserror::Error;

/// Authentication failures
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown user or wrong password. Both map to the same message so
    /// usernames cannot be enumerated.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0}")]
    WeakPassword(String),

    #[error("Password hashing failed: {0}")]
    HashingError(String),

    #[error("Session has expired")]
    TokenExpired,

    #[error("Invalid session token: {0}")]
    InvalidToken(String),

    #[error("Failed to sign session token: {0}")]
    SigningError(String),
}

pub type AuthResult<T> = std::result::Result<T, AuthError>;
