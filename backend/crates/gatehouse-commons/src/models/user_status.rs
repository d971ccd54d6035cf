use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of a user in the approval workflow.
///
/// ```text
/// pending_evaluation ──pass──▶ pending_approval ──approve──▶ approved
///        ▲    │                        │
///        └fail┘                        └──reject──▶ rejected
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    #[default]
    PendingEvaluation,
    PendingApproval,
    Approved,
    Rejected,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::PendingEvaluation => "pending_evaluation",
            UserStatus::PendingApproval => "pending_approval",
            UserStatus::Approved => "approved",
            UserStatus::Rejected => "rejected",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending_evaluation" => Some(UserStatus::PendingEvaluation),
            "pending_approval" => Some(UserStatus::PendingApproval),
            "approved" => Some(UserStatus::Approved),
            "rejected" => Some(UserStatus::Rejected),
            _ => None,
        }
    }

    /// Human-readable label for pages.
    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::PendingEvaluation => "Pending evaluation",
            UserStatus::PendingApproval => "Pending approval",
            UserStatus::Approved => "Approved",
            UserStatus::Rejected => "Rejected",
        }
    }
}

impl FromStr for UserStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserStatus::from_str_opt(s).ok_or_else(|| format!("Invalid UserStatus: {}", s))
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
