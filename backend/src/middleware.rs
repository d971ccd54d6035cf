//! Server-wide middleware configuration helpers.
//!
//! Middleware stack (outermost first):
//!
//! 1. **Logger**: one access-log line per request
//! 2. **DefaultHeaders**: security and cache headers on every response

use actix_web::http::header;
use actix_web::middleware;

/// Build the request logger middleware.
///
/// Query strings are left out of the access log.
pub fn request_logger() -> middleware::Logger {
    middleware::Logger::new(r#"%a "%{request}xi" %s %b %T"#)
        .custom_request_replace("request", |req| format!("{} {}", req.method(), req.path()))
}

/// Headers applied to every response.
///
/// Pages depend on the session and must never be served from a shared or
/// back-button cache.
pub fn security_headers() -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add((header::CACHE_CONTROL, "no-store"))
        .add((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .add((header::X_FRAME_OPTIONS, "DENY"))
        .add((header::REFERRER_POLICY, "same-origin"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    #[actix_web::test]
    async fn test_security_headers_applied() {
        let app = test::init_service(
            App::new()
                .wrap(security_headers())
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");
        assert_eq!(resp.headers().get(header::X_FRAME_OPTIONS).unwrap(), "DENY");
    }
}
