use thiserror::Error;

/// Errors raised by user store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("User not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Corrupt store file: {0}")]
    Corrupt(String),

    #[error("Background task failed: {0}")]
    Task(String),

    /// A [`UserChange`](crate::UserChange) refused to apply.
    #[error("{0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    pub fn rejected<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::Rejected(Box::new(err))
    }
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
