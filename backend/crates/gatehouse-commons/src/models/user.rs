//! The persisted user record.

use serde::{Deserialize, Serialize};

use super::{Role, UserName, UserStatus};

/// A registered account.
///
/// `password_hash` is a bcrypt hash; the plaintext password is never stored.
/// Timestamps are Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: UserName,
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub status: UserStatus,
    /// Last evaluation score, 0 to 100
    #[serde(default)]
    pub evaluation_score: u8,
    #[serde(default)]
    pub evaluation_attempts: u32,
    #[serde(default)]
    pub paid: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl User {
    /// A freshly registered applicant: role user, awaiting evaluation, unpaid.
    pub fn new_applicant(username: UserName, password_hash: String) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            username,
            password_hash,
            role: Role::User,
            status: UserStatus::PendingEvaluation,
            evaluation_score: 0,
            evaluation_attempts: 0,
            paid: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// An administrator account. Admins skip the applicant workflow.
    pub fn new_admin(username: UserName, password_hash: String) -> Self {
        Self {
            role: Role::Admin,
            status: UserStatus::Approved,
            paid: true,
            ..Self::new_applicant(username, password_hash)
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Bump `updated_at` after a mutation.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_applicant_defaults() {
        let user = User::new_applicant(UserName::new("dave"), "hash".to_string());
        assert_eq!(user.role, Role::User);
        assert_eq!(user.status, UserStatus::PendingEvaluation);
        assert_eq!(user.evaluation_score, 0);
        assert!(!user.paid);
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_new_admin_is_approved_and_paid() {
        let admin = User::new_admin(UserName::new("root"), "hash".to_string());
        assert!(admin.is_admin());
        assert_eq!(admin.status, UserStatus::Approved);
        assert!(admin.paid);
    }

    #[test]
    fn test_deserialize_fills_defaults_for_missing_fields() {
        let json = r#"{
            "username": "erin",
            "password_hash": "h",
            "created_at": 1,
            "updated_at": 2
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.status, UserStatus::PendingEvaluation);
        assert_eq!(user.role, Role::User);
        assert!(!user.paid);
    }
}
