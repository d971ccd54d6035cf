//! Route table for the Gatehouse web app
//!
//! - GET /                       landing page or redirect to current page
//! - GET|POST /register          create an applicant account
//! - GET|POST /login             start a session
//! - GET|POST /logout            end the session
//! - GET|POST /evaluation        scored questionnaire
//! - GET /pending                waiting or rejection page
//! - GET|POST /admin/approvals   admin approval queue
//! - GET|POST /payment           simulated payment
//! - GET /dashboard              member dashboard
//! - GET /healthz                liveness probe (JSON)

use crate::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::home_page))
        .service(
            web::resource("/register")
                .route(web::get().to(handlers::register_form))
                .route(web::post().to(handlers::register_submit)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(handlers::login_form))
                .route(web::post().to(handlers::login_submit)),
        )
        .service(
            web::resource("/logout")
                .route(web::get().to(handlers::logout_handler))
                .route(web::post().to(handlers::logout_handler)),
        )
        .service(
            web::resource("/evaluation")
                .route(web::get().to(handlers::evaluation_page))
                .route(web::post().to(handlers::evaluation_submit)),
        )
        .route("/pending", web::get().to(handlers::pending_page))
        .service(
            web::resource("/admin/approvals")
                .route(web::get().to(handlers::approvals_page))
                .route(web::post().to(handlers::approvals_submit)),
        )
        .service(
            web::resource("/payment")
                .route(web::get().to(handlers::payment_page))
                .route(web::post().to(handlers::payment_submit)),
        )
        .route("/dashboard", web::get().to(handlers::dashboard_page))
        .route("/healthz", web::get().to(handlers::healthz_handler));
}
