use crate::error::StoreResult;
use gatehouse_commons::{User, UserName, UserStatus};

/// Edit applied to the stored copy of a record by
/// [`UserRepository::modify_user`]. Returning an error leaves the record as
/// it was.
pub type UserChange = Box<dyn FnOnce(&mut User) -> StoreResult<()> + Send>;

/// Abstraction over user persistence.
///
/// Handlers and services only see this trait so tests can run against a
/// store in a temp directory.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Look up a user by (normalized) username.
    async fn get_user(&self, username: &UserName) -> StoreResult<Option<User>>;

    /// Insert a new user. Fails with `StoreError::AlreadyExists` when the
    /// username is taken.
    async fn insert_user(&self, user: User) -> StoreResult<()>;

    /// Apply `change` to the current stored record and persist the result.
    ///
    /// The read, the change and the write happen under one lock, so the
    /// change always sees the latest record. Fails with
    /// `StoreError::NotFound` when the username is unknown.
    async fn modify_user(&self, username: &UserName, change: UserChange) -> StoreResult<User>;

    /// Return all users ordered by username.
    async fn scan_all_users(&self) -> StoreResult<Vec<User>>;

    /// Return users currently in `status`, oldest registration first.
    async fn users_with_status(&self, status: UserStatus) -> StoreResult<Vec<User>> {
        let mut users: Vec<User> = self
            .scan_all_users()
            .await?
            .into_iter()
            .filter(|u| u.status == status)
            .collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }
}
