//! User status state machine.
//!
//! ```text
//! pending_evaluation --pass--> pending_approval --approve--> approved
//!        ^    |                        |
//!        +----+ fail                   +--reject--> rejected
//! ```
//!
//! `paid` is a separate flag that may only be set once the user is approved.
//! `rejected` has no outgoing transitions.

use std::fmt;
use std::str::FromStr;

use gatehouse_commons::{User, UserStatus};
use thiserror::Error;

use crate::evaluation::passes;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("Cannot {action} while {}", .from.label())]
    InvalidTransition {
        from: UserStatus,
        action: &'static str,
    },

    #[error("Payment has already been recorded")]
    AlreadyPaid,
}

/// Admin verdict on a pending application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminDecision {
    Approve,
    Reject,
}

impl AdminDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminDecision::Approve => "approve",
            AdminDecision::Reject => "reject",
        }
    }
}

impl fmt::Display for AdminDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "approve" => Ok(AdminDecision::Approve),
            "reject" => Ok(AdminDecision::Reject),
            other => Err(format!("Unknown action '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationOutcome {
    Passed { score: u8 },
    Failed { score: u8 },
}

impl EvaluationOutcome {
    pub fn score(&self) -> u8 {
        match self {
            EvaluationOutcome::Passed { score } | EvaluationOutcome::Failed { score } => *score,
        }
    }

    pub fn passed(&self) -> bool {
        matches!(self, EvaluationOutcome::Passed { .. })
    }
}

/// Record an evaluation attempt.
///
/// Only valid while `pending_evaluation`. The score and attempt count are
/// always recorded; the status advances only on a pass.
pub fn apply_evaluation(
    user: &mut User,
    score: u8,
    pass_mark: u8,
) -> Result<EvaluationOutcome, WorkflowError> {
    if user.status != UserStatus::PendingEvaluation {
        return Err(WorkflowError::InvalidTransition {
            from: user.status,
            action: "submit the evaluation",
        });
    }

    user.evaluation_score = score;
    user.evaluation_attempts = user.evaluation_attempts.saturating_add(1);
    user.touch();

    if passes(score, pass_mark) {
        user.status = UserStatus::PendingApproval;
        Ok(EvaluationOutcome::Passed { score })
    } else {
        Ok(EvaluationOutcome::Failed { score })
    }
}

pub fn approve(user: &mut User) -> Result<(), WorkflowError> {
    decide(user, AdminDecision::Approve)
}

pub fn reject(user: &mut User) -> Result<(), WorkflowError> {
    decide(user, AdminDecision::Reject)
}

/// Apply an admin decision. Only applications awaiting approval can be
/// decided, so a rejected user can never be approved later.
pub fn decide(user: &mut User, decision: AdminDecision) -> Result<(), WorkflowError> {
    if user.status != UserStatus::PendingApproval {
        return Err(WorkflowError::InvalidTransition {
            from: user.status,
            action: decision.as_str(),
        });
    }

    user.status = match decision {
        AdminDecision::Approve => UserStatus::Approved,
        AdminDecision::Reject => UserStatus::Rejected,
    };
    user.touch();
    Ok(())
}

/// Mark an approved user as paid.
pub fn record_payment(user: &mut User) -> Result<(), WorkflowError> {
    if user.status != UserStatus::Approved {
        return Err(WorkflowError::InvalidTransition {
            from: user.status,
            action: "pay",
        });
    }
    if user.paid {
        return Err(WorkflowError::AlreadyPaid);
    }

    user.paid = true;
    user.touch();
    Ok(())
}
