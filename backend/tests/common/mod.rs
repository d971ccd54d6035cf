//! Shared helpers for Gatehouse integration tests.
//!
//! Each `TestServer` owns a temp directory holding its user store, so tests
//! never share state. bcrypt runs at cost 4 to keep the suite fast.

#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::test::TestRequest;
use gatehouse_api::AppContext;
use gatehouse_auth::{create_session_token, Flash};
use gatehouse_commons::{AuthConstants, User, UserName, UserStatus};
use gatehouse_configs::ServerConfig;
use gatehouse_server::lifecycle::bootstrap;
use gatehouse_store::{StoreResult, UserRepository};
use tempfile::TempDir;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-password-123";
pub const PASSWORD: &str = "applicant-password-1";

pub struct TestServer {
    _dir: TempDir,
    pub config: ServerConfig,
    pub ctx: AppContext,
}

impl TestServer {
    pub async fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let mut config = ServerConfig::default();
        config.storage.users_file = dir.path().join("users.json").display().to_string();
        config.auth.bcrypt_cost = 4;
        config.auth.session_secret = "integration-test-secret".to_string();
        config.auth.admin_username = Some(ADMIN_USERNAME.to_string());
        config.auth.admin_password = Some(ADMIN_PASSWORD.to_string());

        let components = bootstrap(&config).await.expect("bootstrap");

        Self {
            _dir: dir,
            config,
            ctx: components.app_context,
        }
    }

    /// Register `username` directly through the account service.
    pub async fn register(&self, username: &str) -> User {
        self.ctx
            .accounts
            .register(username, PASSWORD, PASSWORD)
            .await
            .expect("register")
    }

    /// Register `username` and force it into `status` / `paid`.
    pub async fn user_in(&self, username: &str, status: UserStatus, paid: bool) -> User {
        let user = self.register(username).await;
        self.ctx
            .users
            .modify_user(
                &user.username,
                Box::new(move |user: &mut User| -> StoreResult<()> {
                    user.status = status;
                    user.paid = paid;
                    Ok(())
                }),
            )
            .await
            .expect("update user")
    }

    pub async fn load(&self, username: &str) -> User {
        self.ctx
            .users
            .get_user(&UserName::new(username))
            .await
            .expect("load user")
            .expect("user exists")
    }

    /// A valid session cookie for `username`, as if they had logged in.
    pub fn session_for(&self, username: &str) -> Cookie<'static> {
        let (token, _) = create_session_token(
            &UserName::new(username),
            gatehouse_commons::Role::User,
            Some(1),
            &self.config.auth.session_secret,
        )
        .expect("sign token");
        Cookie::new(AuthConstants::SESSION_COOKIE_NAME, token)
    }

    pub fn admin_session(&self) -> Cookie<'static> {
        self.session_for(ADMIN_USERNAME)
    }
}

/// Build the full application for `server`, as the binary does.
macro_rules! init_app {
    ($server:expr) => {{
        let ctx = $server.ctx.clone();
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(gatehouse_server::middleware::security_headers())
                .configure(move |cfg| ctx.configure(cfg)),
        )
        .await
    }};
}

pub fn get(uri: &str, session: Option<&Cookie<'static>>) -> TestRequest {
    let req = TestRequest::get().uri(uri);
    match session {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    }
}

pub fn post_form(
    uri: &str,
    session: Option<&Cookie<'static>>,
    form: &[(&str, &str)],
) -> TestRequest {
    let req = TestRequest::post().uri(uri).set_form(form);
    match session {
        Some(cookie) => req.cookie(cookie.clone()),
        None => req,
    }
}

/// The `Location` header of a redirect.
pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// The flash message set by a response, if any.
pub fn flash<B>(resp: &ServiceResponse<B>) -> Option<Flash> {
    resp.response()
        .cookies()
        .find(|c| c.name() == AuthConstants::FLASH_COOKIE_NAME)
        .and_then(|c| Flash::decode(c.value()))
}

/// The session cookie set by a response, if any.
pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == AuthConstants::SESSION_COOKIE_NAME)
        .map(|c| c.into_owned())
}

/// Form answers with the first `correct` questions right and the rest wrong.
pub fn answers(server: &TestServer, correct: usize) -> Vec<(String, String)> {
    server
        .ctx
        .accounts
        .question_bank()
        .questions()
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let answer = if i < correct {
                q.answer.clone()
            } else {
                "definitely wrong".to_string()
            };
            (q.id.clone(), answer)
        })
        .collect()
}
