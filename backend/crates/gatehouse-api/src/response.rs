//! Response helpers shared by the page handlers.

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse};
use gatehouse_auth::Flash;

/// Render an HTML page, consuming any pending flash message.
pub fn html_page<F>(req: &HttpRequest, build: F) -> HttpResponse
where
    F: FnOnce(Option<&Flash>) -> String,
{
    let flash = Flash::from_request(req);
    let body = build(flash.as_ref());

    let mut builder = HttpResponse::Ok();
    builder.content_type(ContentType::html());
    if flash.is_some() {
        builder.cookie(Flash::clear_cookie());
    }
    builder.body(body)
}

/// `303 See Other` to `to`.
pub fn see_other(to: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, to))
        .finish()
}

/// `303 See Other` to `to` with a flash message for the next page.
pub fn see_other_with(to: &str, flash: Flash) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, to))
        .cookie(flash.to_cookie())
        .finish()
}
