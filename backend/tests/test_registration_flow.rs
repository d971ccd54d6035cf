//! Integration tests for registration, login and logout

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use common::{flash, location, post_form, session_cookie, TestServer, PASSWORD};
use gatehouse_auth::FlashLevel;
use gatehouse_commons::UserStatus;

#[actix_web::test]
async fn test_register_creates_pending_applicant() {
    let server = TestServer::new().await;
    let app = init_app!(server);

    let resp = test::call_service(
        &app,
        post_form(
            "/register",
            None,
            &[("username", "Alice"), ("password", PASSWORD), ("confirm_password", PASSWORD)],
        )
        .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
    assert_eq!(flash(&resp).unwrap().level, FlashLevel::Success);

    let user = server.load("alice").await;
    assert_eq!(user.status, UserStatus::PendingEvaluation);
    assert_eq!(user.evaluation_score, 0);
    assert!(!user.paid);
}

#[actix_web::test]
async fn test_duplicate_username_rejected() {
    let server = TestServer::new().await;
    let app = init_app!(server);
    server.register("bob").await;

    let resp = test::call_service(
        &app,
        post_form(
            "/register",
            None,
            &[("username", "BOB"), ("password", PASSWORD), ("confirm_password", PASSWORD)],
        )
        .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/register");
    let message = flash(&resp).unwrap();
    assert_eq!(message.level, FlashLevel::Error);
    assert!(message.message.contains("already taken"), "{}", message.message);
}

#[actix_web::test]
async fn test_register_validation_messages() {
    let server = TestServer::new().await;
    let app = init_app!(server);

    let cases: [(&str, &str, &str, &str); 3] = [
        ("x", PASSWORD, PASSWORD, "at least 3"),
        ("carol", PASSWORD, "something-else-1", "do not match"),
        ("carol", "password", "password", "too common"),
    ];

    for (username, password, confirm, expected) in cases {
        let resp = test::call_service(
            &app,
            post_form(
                "/register",
                None,
                &[("username", username), ("password", password), ("confirm_password", confirm)],
            )
            .to_request(),
        )
        .await;

        assert_eq!(location(&resp), "/register");
        let message = flash(&resp).unwrap().message;
        assert!(message.contains(expected), "expected '{}' in '{}'", expected, message);
    }
}

#[actix_web::test]
async fn test_malformed_form_redirects_back() {
    let server = TestServer::new().await;
    let app = init_app!(server);

    let resp = test::call_service(
        &app,
        post_form("/register", None, &[("username", "dave")]).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/register");
    assert_eq!(flash(&resp).unwrap().level, FlashLevel::Error);
}

#[actix_web::test]
async fn test_login_sets_session_and_redirects_to_evaluation() {
    let server = TestServer::new().await;
    let app = init_app!(server);
    server.register("erin").await;

    let resp = test::call_service(
        &app,
        post_form("/login", None, &[("username", "erin"), ("password", PASSWORD)]).to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/evaluation");
    let session = session_cookie(&resp).expect("session cookie");
    assert_eq!(session.http_only(), Some(true));

    let resp = test::call_service(&app, common::get("/evaluation", Some(&session)).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_wrong_password_rejected() {
    let server = TestServer::new().await;
    let app = init_app!(server);
    server.register("frank").await;

    for (username, password) in [("frank", "not-the-password"), ("nobody", PASSWORD)] {
        let resp = test::call_service(
            &app,
            post_form("/login", None, &[("username", username), ("password", password)])
                .to_request(),
        )
        .await;

        assert_eq!(location(&resp), "/login");
        assert!(session_cookie(&resp).is_none());
        assert_eq!(flash(&resp).unwrap().message, "Invalid username or password");
    }
}

#[actix_web::test]
async fn test_admin_login_lands_on_approvals() {
    let server = TestServer::new().await;
    let app = init_app!(server);

    let resp = test::call_service(
        &app,
        post_form(
            "/login",
            None,
            &[("username", common::ADMIN_USERNAME), ("password", common::ADMIN_PASSWORD)],
        )
        .to_request(),
    )
    .await;

    assert_eq!(location(&resp), "/admin/approvals");
}

#[actix_web::test]
async fn test_logout_clears_session() {
    let server = TestServer::new().await;
    let app = init_app!(server);
    server.register("gina").await;
    let session = server.session_for("gina");

    let resp = test::call_service(&app, post_form("/logout", Some(&session), &[]).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    let cleared = session_cookie(&resp).expect("clearing cookie");
    assert_eq!(cleared.value(), "");

    let resp = test::call_service(&app, common::get("/logout", None).to_request()).await;
    assert_eq!(location(&resp), "/");
}

#[actix_web::test]
async fn test_home_redirects_signed_in_users() {
    let server = TestServer::new().await;
    let app = init_app!(server);
    server.register("henry").await;

    let resp = test::call_service(&app, common::get("/", None).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        common::get("/", Some(&server.session_for("henry"))).to_request(),
    )
    .await;
    assert_eq!(location(&resp), "/evaluation");

    let resp = test::call_service(&app, common::get("/login", Some(&server.admin_session())).to_request()).await;
    assert_eq!(location(&resp), "/admin/approvals");
}

#[actix_web::test]
async fn test_invalid_session_is_anonymous() {
    let server = TestServer::new().await;
    let app = init_app!(server);

    let forged = actix_web::cookie::Cookie::new(
        gatehouse_commons::AuthConstants::SESSION_COOKIE_NAME,
        "not-a-jwt",
    );
    let resp = test::call_service(&app, common::get("/dashboard", Some(&forged)).to_request()).await;
    assert_eq!(location(&resp), "/login");

    // Token for a user that is not in the store
    let ghost = server.session_for("ghost");
    let resp = test::call_service(&app, common::get("/pending", Some(&ghost)).to_request()).await;
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn test_healthz() {
    let server = TestServer::new().await;
    let app = init_app!(server);

    let resp = test::call_service(&app, common::get("/healthz", None).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(actix_web::http::header::CACHE_CONTROL).unwrap(),
        "no-store"
    );

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
