//! Integration tests for the scored evaluation gate

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use common::{answers, flash, get, location, TestServer};
use gatehouse_auth::FlashLevel;
use gatehouse_commons::UserStatus;

#[actix_web::test]
async fn test_evaluation_requires_login() {
    let server = TestServer::new().await;
    let app = init_app!(server);

    let resp = test::call_service(&app, get("/evaluation", None).to_request()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn test_evaluation_page_lists_questions() {
    let server = TestServer::new().await;
    let app = init_app!(server);
    server.register("alice").await;

    let resp = test::call_service(
        &app,
        get("/evaluation", Some(&server.session_for("alice"))).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let html = std::str::from_utf8(&body).unwrap();
    for question in server.ctx.accounts.question_bank().questions() {
        assert!(html.contains(&format!(r#"name="{}""#, question.id)));
    }
}

#[actix_web::test]
async fn test_seventy_percent_passes() {
    let server = TestServer::new().await;
    let app = init_app!(server);
    server.register("bob").await;

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/evaluation")
            .cookie(server.session_for("bob"))
            .set_form(answers(&server, 7))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/pending");
    let message = flash(&resp).unwrap();
    assert_eq!(message.level, FlashLevel::Success);
    assert!(message.message.contains("70%"), "{}", message.message);

    let user = server.load("bob").await;
    assert_eq!(user.status, UserStatus::PendingApproval);
    assert_eq!(user.evaluation_score, 70);
    assert_eq!(user.evaluation_attempts, 1);
}

#[actix_web::test]
async fn test_failing_score_allows_retry() {
    let server = TestServer::new().await;
    let app = init_app!(server);
    server.register("carol").await;
    let session = server.session_for("carol");

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/evaluation")
            .cookie(session.clone())
            .set_form(answers(&server, 6))
            .to_request(),
    )
    .await;

    assert_eq!(location(&resp), "/evaluation");
    let message = flash(&resp).unwrap();
    assert_eq!(message.level, FlashLevel::Error);
    assert!(message.message.contains("60%"), "{}", message.message);

    let user = server.load("carol").await;
    assert_eq!(user.status, UserStatus::PendingEvaluation);
    assert_eq!(user.evaluation_score, 60);

    // Second attempt
    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/evaluation")
            .cookie(session)
            .set_form(answers(&server, 10))
            .to_request(),
    )
    .await;
    assert_eq!(location(&resp), "/pending");

    let user = server.load("carol").await;
    assert_eq!(user.status, UserStatus::PendingApproval);
    assert_eq!(user.evaluation_attempts, 2);
}

#[actix_web::test]
async fn test_unanswered_questions_count_as_wrong() {
    let server = TestServer::new().await;
    let app = init_app!(server);
    server.register("dave").await;

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/evaluation")
            .cookie(server.session_for("dave"))
            .set_form(Vec::<(String, String)>::new())
            .to_request(),
    )
    .await;

    assert_eq!(location(&resp), "/evaluation");
    assert_eq!(server.load("dave").await.evaluation_score, 0);
}

#[actix_web::test]
async fn test_evaluation_closed_after_passing() {
    let server = TestServer::new().await;
    let app = init_app!(server);
    server.user_in("erin", UserStatus::PendingApproval, false).await;
    let session = server.session_for("erin");

    let resp = test::call_service(&app, get("/evaluation", Some(&session)).to_request()).await;
    assert_eq!(location(&resp), "/pending");

    let resp = test::call_service(
        &app,
        TestRequest::post()
            .uri("/evaluation")
            .cookie(session)
            .set_form(answers(&server, 0))
            .to_request(),
    )
    .await;
    assert_eq!(location(&resp), "/pending");

    let user = server.load("erin").await;
    assert_eq!(user.status, UserStatus::PendingApproval);
    assert_eq!(user.evaluation_attempts, 0);
}

#[actix_web::test]
async fn test_pending_page_shows_waiting_message() {
    let server = TestServer::new().await;
    let app = init_app!(server);
    server.user_in("frank", UserStatus::PendingApproval, false).await;

    let resp = test::call_service(
        &app,
        get("/pending", Some(&server.session_for("frank"))).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().contains("Awaiting approval"));

    // Applicants who have not passed yet are sent back to the evaluation
    server.register("gina").await;
    let resp = test::call_service(
        &app,
        get("/pending", Some(&server.session_for("gina"))).to_request(),
    )
    .await;
    assert_eq!(location(&resp), "/evaluation");
}
