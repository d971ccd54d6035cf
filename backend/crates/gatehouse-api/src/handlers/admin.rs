//! Admin approval queue
//!
//! - GET /admin/approvals - lists applications in `pending_approval`
//! - POST /admin/approvals - approves or rejects one application

use actix_web::{web, HttpRequest, HttpResponse};
use gatehouse_auth::{CurrentUser, Flash};
use gatehouse_core::{check_access, AccountService, AdminDecision, Destination, Requirement};

use crate::error::ApiError;
use crate::models::ApprovalForm;
use crate::pages;
use crate::response::{html_page, see_other_with};

pub async fn approvals_page(
    req: HttpRequest,
    current: CurrentUser,
    accounts: web::Data<AccountService>,
) -> Result<HttpResponse, ApiError> {
    let admin = check_access(current.user(), Requirement::Admin)?;

    let pending = accounts
        .pending_applications()
        .await
        .map_err(|e| ApiError::from_service(e, Destination::Home.path()))?;

    Ok(html_page(&req, |flash| pages::admin_approvals(admin, &pending, flash)))
}

pub async fn approvals_submit(
    current: CurrentUser,
    accounts: web::Data<AccountService>,
    form: web::Form<ApprovalForm>,
) -> Result<HttpResponse, ApiError> {
    let admin = check_access(current.user(), Requirement::Admin)?;
    let back_to = Destination::AdminApprovals.path();

    let decision: AdminDecision = form
        .action
        .parse()
        .map_err(|e: String| ApiError::redirect_with(back_to, Flash::error(e)))?;

    let user = accounts
        .decide(admin, &form.username, decision)
        .await
        .map_err(|e| ApiError::from_service(e, back_to))?;

    let message = match decision {
        AdminDecision::Approve => format!("Approved '{}'.", user.username),
        AdminDecision::Reject => format!("Rejected '{}'.", user.username),
    };
    Ok(see_other_with(back_to, Flash::success(message)))
}
