use actix_web::{HttpRequest, HttpResponse};
use gatehouse_auth::CurrentUser;
use gatehouse_commons::UserStatus;
use gatehouse_core::{check_access, current_destination, Requirement};

use crate::error::ApiError;
use crate::pages;
use crate::response::{html_page, see_other};

/// GET /pending
///
/// Waiting page while an application is under review, and the final page
/// for rejected applicants. Anyone else is sent to their current page.
pub async fn pending_page(req: HttpRequest, current: CurrentUser) -> Result<HttpResponse, ApiError> {
    let user = check_access(current.user(), Requirement::Authenticated)?;

    if user.is_admin() {
        return Ok(see_other(current_destination(user).path()));
    }

    let response = match user.status {
        UserStatus::PendingApproval => html_page(&req, |flash| pages::pending(user, flash)),
        UserStatus::Rejected => html_page(&req, |flash| pages::rejected(user, flash)),
        UserStatus::PendingEvaluation | UserStatus::Approved => {
            see_other(current_destination(user).path())
        },
    };

    Ok(response)
}
