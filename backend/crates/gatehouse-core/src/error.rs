use gatehouse_auth::AuthError;
use gatehouse_commons::CommonError;
use gatehouse_store::StoreError;
use thiserror::Error;

use crate::workflow::WorkflowError;

/// Errors from account operations.
///
/// Everything except `Store` and `Auth` is caused by the visitor and carries
/// a message that can be shown back to them.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0}")]
    WeakPassword(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("User '{0}' not found")]
    UserNotFound(String),

    #[error("Administrator access required")]
    Forbidden,

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Storage failure: {0}")]
    Store(StoreError),

    #[error("Authentication failure: {0}")]
    Auth(AuthError),
}

impl ServiceError {
    /// Whether the message is safe and useful to show to the visitor.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, ServiceError::Store(_) | ServiceError::Auth(_))
    }
}

impl From<CommonError> for ServiceError {
    fn from(err: CommonError) -> Self {
        ServiceError::InvalidInput(err.message().to_string())
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(name) => ServiceError::UsernameTaken(name),
            StoreError::NotFound(name) => ServiceError::UserNotFound(name),
            StoreError::Rejected(err) => match err.downcast::<WorkflowError>() {
                Ok(workflow) => ServiceError::Workflow(*workflow),
                Err(err) => ServiceError::Store(StoreError::Rejected(err)),
            },
            other => ServiceError::Store(other),
        }
    }
}

impl From<AuthError> for ServiceError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ServiceError::InvalidCredentials,
            AuthError::WeakPassword(reason) => ServiceError::WeakPassword(reason),
            other => ServiceError::Auth(other),
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
