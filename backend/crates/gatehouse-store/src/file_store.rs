//! JSON-file backed user store.
//!
//! The file holds one JSON object keyed by username. It is read once when
//! the store is opened; every insert/modify rewrites the whole file through
//! a temp file and a rename. Reading the current record, applying a change
//! and writing the file all happen under one mutex, so two concurrent
//! mutations cannot lose each other's changes.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use gatehouse_commons::{User, UserName};
use log::{debug, info};
use parking_lot::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::user_repo::{UserChange, UserRepository};

type UserMap = BTreeMap<UserName, User>;
type Undo = Box<dyn FnOnce(&mut UserMap) + Send>;

pub struct FileUserStore {
    path: PathBuf,
    users: Arc<Mutex<UserMap>>,
}

impl FileUserStore {
    /// Open the store at `path`, loading every record into memory.
    ///
    /// A missing file is an empty store; it is created on the first write.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let users = load(&path)?;

        info!("Loaded {} user(s) from {}", users.len(), path.display());

        Ok(Self {
            path,
            users: Arc::new(Mutex::new(users)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.users.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.lock().is_empty()
    }

    /// Run `mutate` against the locked map on the blocking pool, then
    /// persist. If persisting fails the map is restored from the returned
    /// undo.
    async fn mutate<T, F>(&self, mutate: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut UserMap) -> StoreResult<(T, Undo)> + Send + 'static,
    {
        let users = self.users.clone();
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || {
            let mut guard = users.lock();
            let (value, undo) = mutate(&mut *guard)?;

            if let Err(e) = persist(&path, &guard) {
                undo(&mut *guard);
                return Err(e);
            }
            Ok(value)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

#[async_trait::async_trait]
impl UserRepository for FileUserStore {
    async fn get_user(&self, username: &UserName) -> StoreResult<Option<User>> {
        Ok(self.users.lock().get(username).cloned())
    }

    async fn insert_user(&self, user: User) -> StoreResult<()> {
        let username = user.username.clone();

        self.mutate(move |users| {
            if users.contains_key(&user.username) {
                return Err(StoreError::AlreadyExists(user.username.to_string()));
            }
            let key = user.username.clone();
            users.insert(key.clone(), user);
            let undo: Undo = Box::new(move |users: &mut UserMap| {
                users.remove(&key);
            });
            Ok(((), undo))
        })
        .await?;

        debug!("Inserted user '{}'", username);
        Ok(())
    }

    async fn modify_user(&self, username: &UserName, change: UserChange) -> StoreResult<User> {
        let key = username.clone();

        let updated = self
            .mutate(move |users| {
                let existing = users
                    .get_mut(&key)
                    .ok_or_else(|| StoreError::NotFound(key.to_string()))?;

                let mut updated = existing.clone();
                change(&mut updated)?;
                if updated.username != key {
                    return Err(StoreError::Corrupt(format!(
                        "change renamed '{}' to '{}'",
                        key, updated.username
                    )));
                }

                let previous = std::mem::replace(existing, updated.clone());
                let undo: Undo = Box::new(move |users: &mut UserMap| {
                    users.insert(key, previous);
                });
                Ok((updated, undo))
            })
            .await?;

        debug!("Updated user '{}'", updated.username);
        Ok(updated)
    }

    async fn scan_all_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.users.lock().values().cloned().collect())
    }
}

fn load(path: &Path) -> StoreResult<UserMap> {
    if !path.exists() {
        return Ok(UserMap::new());
    }

    let content = fs::read_to_string(path)
        .map_err(|e| StoreError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

    if content.trim().is_empty() {
        return Ok(UserMap::new());
    }

    let users: UserMap = serde_json::from_str(&content).map_err(|e| {
        StoreError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    for (key, user) in &users {
        if key != &user.username {
            return Err(StoreError::Corrupt(format!(
                "key '{}' holds record for '{}'",
                key, user.username
            )));
        }
    }

    Ok(users)
}

fn persist(path: &Path, users: &UserMap) -> StoreResult<()> {
    let tmp_path = path.with_extension("json.tmp");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Io(format!("Failed to create directory {}: {}", parent.display(), e))
            })?;
        }
    }

    let json = serde_json::to_string_pretty(users)
        .map_err(|e| StoreError::Serialization(format!("Failed to serialize users: {}", e)))?;

    fs::write(&tmp_path, json).map_err(|e| {
        StoreError::Io(format!("Failed to write users to {}: {}", tmp_path.display(), e))
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        StoreError::Io(format!(
            "Failed to rename {} to {}: {}",
            tmp_path.display(),
            path.display(),
            e
        ))
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_commons::UserStatus;
    use tempfile::TempDir;

    fn applicant(name: &str) -> User {
        User::new_applicant(UserName::new(name), "$2b$04$hash".to_string())
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = TempDir::new().unwrap();
        let store = FileUserStore::open(dir.path().join("users.json")).unwrap();
        assert!(store.is_empty());
        assert!(store.get_user(&UserName::new("nobody")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("users.json");

        let store = FileUserStore::open(&path).unwrap();
        store.insert_user(applicant("alice")).await.unwrap();
        store.insert_user(applicant("bob")).await.unwrap();
        assert!(path.exists());

        let reopened = FileUserStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 2);
        let alice = reopened.get_user(&UserName::new("alice")).await.unwrap().unwrap();
        assert_eq!(alice.status, UserStatus::PendingEvaluation);
    }

    #[tokio::test]
    async fn test_duplicate_insert_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FileUserStore::open(dir.path().join("users.json")).unwrap();

        store.insert_user(applicant("alice")).await.unwrap();
        let err = store.insert_user(applicant("alice")).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
        assert_eq!(store.len(), 1);
    }

    #[derive(Debug, thiserror::Error)]
    #[error("not allowed")]
    struct NotAllowed;

    #[tokio::test]
    async fn test_modify_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let store = FileUserStore::open(&path).unwrap();
        store.insert_user(applicant("carol")).await.unwrap();

        let carol = store
            .modify_user(
                &UserName::new("carol"),
                Box::new(|user: &mut User| -> StoreResult<()> {
                    user.status = UserStatus::PendingApproval;
                    user.evaluation_score = 90;
                    Ok(())
                }),
            )
            .await
            .unwrap();
        assert_eq!(carol.status, UserStatus::PendingApproval);

        let reopened = FileUserStore::open(&path).unwrap();
        let reloaded = reopened.get_user(&UserName::new("carol")).await.unwrap().unwrap();
        assert_eq!(reloaded.status, UserStatus::PendingApproval);
        assert_eq!(reloaded.evaluation_score, 90);
    }

    #[tokio::test]
    async fn test_modify_sees_latest_record() {
        let dir = TempDir::new().unwrap();
        let store = FileUserStore::open(dir.path().join("users.json")).unwrap();
        store.insert_user(applicant("dora")).await.unwrap();
        let name = UserName::new("dora");

        store
            .modify_user(
                &name,
                Box::new(|user: &mut User| -> StoreResult<()> {
                    user.status = UserStatus::Approved;
                    Ok(())
                }),
            )
            .await
            .unwrap();

        let seen = store
            .modify_user(
                &name,
                Box::new(|user: &mut User| -> StoreResult<()> {
                    user.paid = true;
                    Ok(())
                }),
            )
            .await
            .unwrap();
        assert_eq!(seen.status, UserStatus::Approved);
        assert!(seen.paid);
    }

    #[tokio::test]
    async fn test_rejected_change_leaves_record_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let store = FileUserStore::open(&path).unwrap();
        store.insert_user(applicant("eve")).await.unwrap();

        let err = store
            .modify_user(
                &UserName::new("eve"),
                Box::new(|user: &mut User| -> StoreResult<()> {
                    user.paid = true;
                    Err(StoreError::rejected(NotAllowed))
                }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
        assert_eq!(err.to_string(), "not allowed");

        let stored = store.get_user(&UserName::new("eve")).await.unwrap().unwrap();
        assert!(!stored.paid);
        let reopened = FileUserStore::open(&path).unwrap();
        assert!(!reopened.get_user(&UserName::new("eve")).await.unwrap().unwrap().paid);
    }

    #[tokio::test]
    async fn test_modify_unknown_user() {
        let dir = TempDir::new().unwrap();
        let store = FileUserStore::open(dir.path().join("users.json")).unwrap();
        let err = store
            .modify_user(
                &UserName::new("ghost"),
                Box::new(|_: &mut User| -> StoreResult<()> { Ok(()) }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_concurrent_modifications_all_apply() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let store = Arc::new(FileUserStore::open(&path).unwrap());
        store.insert_user(applicant("finn")).await.unwrap();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .modify_user(
                        &UserName::new("finn"),
                        Box::new(|user: &mut User| -> StoreResult<()> {
                            user.evaluation_attempts += 1;
                            Ok(())
                        }),
                    )
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let reopened = FileUserStore::open(&path).unwrap();
        let finn = reopened.get_user(&UserName::new("finn")).await.unwrap().unwrap();
        assert_eq!(finn.evaluation_attempts, 16);
    }

    #[tokio::test]
    async fn test_users_with_status_filters() {
        let dir = TempDir::new().unwrap();
        let store = FileUserStore::open(dir.path().join("users.json")).unwrap();
        store.insert_user(applicant("dave")).await.unwrap();

        let mut erin = applicant("erin");
        erin.status = UserStatus::PendingApproval;
        store.insert_user(erin).await.unwrap();

        let pending = store.users_with_status(UserStatus::PendingApproval).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].username.as_str(), "erin");
    }

    #[tokio::test]
    async fn test_concurrent_inserts_are_all_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let store = Arc::new(FileUserStore::open(&path).unwrap());

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.insert_user(applicant(&format!("user{}", i))).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let reopened = FileUserStore::open(&path).unwrap();
        assert_eq!(reopened.len(), 16);
    }

    #[test]
    fn test_mismatched_key_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let user = applicant("frank");
        let mut map = serde_json::Map::new();
        map.insert("mallory".to_string(), serde_json::to_value(&user).unwrap());
        fs::write(&path, serde_json::Value::Object(map).to_string()).unwrap();

        let result = FileUserStore::open(&path);
        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }
}
