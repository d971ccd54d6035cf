use actix_web::HttpResponse;
use serde_json::json;

/// GET /healthz
pub async fn healthz_handler() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
