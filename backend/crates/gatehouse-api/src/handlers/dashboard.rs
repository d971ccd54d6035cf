use actix_web::{HttpRequest, HttpResponse};
use gatehouse_auth::CurrentUser;
use gatehouse_core::{check_access, Requirement};

use crate::error::ApiError;
use crate::pages;
use crate::response::html_page;

/// GET /dashboard - approved, paid members only
pub async fn dashboard_page(
    req: HttpRequest,
    current: CurrentUser,
) -> Result<HttpResponse, ApiError> {
    let user = check_access(current.user(), Requirement::ApprovedAndPaid)?;
    Ok(html_page(&req, |flash| pages::dashboard(user, flash)))
}
