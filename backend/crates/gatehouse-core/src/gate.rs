//! Access gate for protected pages.
//!
//! Checks run in a fixed order and stop at the first unmet precondition:
//! session, role, status, paid flag. A failed check names the page the
//! visitor should be sent to instead.

use gatehouse_commons::{User, UserStatus};

/// Pages a visitor can be redirected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Home,
    Register,
    Login,
    Evaluation,
    Pending,
    Payment,
    Dashboard,
    AdminApprovals,
}

impl Destination {
    pub fn path(&self) -> &'static str {
        match self {
            Destination::Home => "/",
            Destination::Register => "/register",
            Destination::Login => "/login",
            Destination::Evaluation => "/evaluation",
            Destination::Pending => "/pending",
            Destination::Payment => "/payment",
            Destination::Dashboard => "/dashboard",
            Destination::AdminApprovals => "/admin/approvals",
        }
    }
}

/// What a route demands of the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Authenticated,
    Admin,
    Status(UserStatus),
    Approved,
    ApprovedAndPaid,
}

/// The page matching the user's position in the workflow.
pub fn current_destination(user: &User) -> Destination {
    if user.is_admin() {
        return Destination::AdminApprovals;
    }
    status_destination(user)
}

fn status_destination(user: &User) -> Destination {
    match user.status {
        UserStatus::PendingEvaluation => Destination::Evaluation,
        UserStatus::PendingApproval | UserStatus::Rejected => Destination::Pending,
        UserStatus::Approved if user.paid => Destination::Dashboard,
        UserStatus::Approved => Destination::Payment,
    }
}

/// Check `requirement` against the visitor.
///
/// Returns the user when every check passes, otherwise the first unmet
/// precondition's page.
pub fn check_access(user: Option<&User>, requirement: Requirement) -> Result<&User, Destination> {
    let user = user.ok_or(Destination::Login)?;

    match requirement {
        Requirement::Authenticated => {},
        Requirement::Admin => {
            if !user.is_admin() {
                return Err(Destination::Home);
            }
        },
        Requirement::Status(status) => {
            if user.status != status {
                return Err(current_destination(user));
            }
        },
        Requirement::Approved => {
            if user.status != UserStatus::Approved {
                return Err(current_destination(user));
            }
        },
        Requirement::ApprovedAndPaid => {
            if user.status != UserStatus::Approved {
                return Err(current_destination(user));
            }
            if !user.paid {
                return Err(Destination::Payment);
            }
        },
    }

    Ok(user)
}
