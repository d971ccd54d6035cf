use actix_web::{HttpRequest, HttpResponse};
use gatehouse_auth::CurrentUser;
use gatehouse_core::current_destination;

use crate::pages;
use crate::response::{html_page, see_other};

/// GET /
///
/// Signed-in visitors go straight to the page for their current status.
pub async fn home_page(req: HttpRequest, current: CurrentUser) -> HttpResponse {
    match current.user() {
        Some(user) => see_other(current_destination(user).path()),
        None => html_page(&req, pages::landing),
    }
}
