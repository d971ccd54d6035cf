//! Registration, login and logout
//!
//! - GET/POST /register
//! - GET/POST /login
//! - GET/POST /logout

use actix_web::{web, HttpRequest, HttpResponse};
use chrono::Duration;
use gatehouse_auth::{
    create_logout_cookie, create_session_cookie, create_session_token, CookieConfig, CurrentUser,
    Flash,
};
use gatehouse_configs::AuthSettings;
use gatehouse_core::{current_destination, AccountService, Destination};

use crate::error::ApiError;
use crate::models::{LoginForm, RegisterForm};
use crate::pages;
use crate::response::{html_page, see_other, see_other_with};

/// GET /register
pub async fn register_form(req: HttpRequest, current: CurrentUser) -> HttpResponse {
    if let Some(user) = current.user() {
        return see_other(current_destination(user).path());
    }
    html_page(&req, pages::register_form)
}

/// POST /register
pub async fn register_submit(
    accounts: web::Data<AccountService>,
    form: web::Form<RegisterForm>,
) -> Result<HttpResponse, ApiError> {
    let form = form.into_inner();
    let user = accounts
        .register(&form.username, &form.password, &form.confirm_password)
        .await
        .map_err(|e| ApiError::from_service(e, Destination::Register.path()))?;

    Ok(see_other_with(
        Destination::Login.path(),
        Flash::success(format!(
            "Account '{}' created. Log in to start your evaluation.",
            user.username
        )),
    ))
}

/// GET /login
pub async fn login_form(req: HttpRequest, current: CurrentUser) -> HttpResponse {
    if let Some(user) = current.user() {
        return see_other(current_destination(user).path());
    }
    html_page(&req, pages::login_form)
}

/// POST /login
///
/// On success sets the HttpOnly session cookie and sends the user to the
/// page for their current status.
pub async fn login_submit(
    accounts: web::Data<AccountService>,
    config: web::Data<AuthSettings>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, ApiError> {
    let user = accounts
        .authenticate(&form.username, &form.password)
        .await
        .map_err(|e| ApiError::from_service(e, Destination::Login.path()))?;

    let (token, _claims) = create_session_token(
        &user.username,
        user.role,
        Some(config.session_expiry_hours),
        &config.session_secret,
    )?;

    let cookie = create_session_cookie(
        &token,
        Duration::hours(config.session_expiry_hours),
        &CookieConfig::from_settings(&config),
    );

    Ok(HttpResponse::SeeOther()
        .insert_header((
            actix_web::http::header::LOCATION,
            current_destination(&user).path(),
        ))
        .cookie(cookie)
        .cookie(Flash::success(format!("Welcome, {}.", user.username)).to_cookie())
        .finish())
}

/// GET|POST /logout
pub async fn logout_handler(config: web::Data<AuthSettings>) -> HttpResponse {
    let cookie = create_logout_cookie(&CookieConfig::from_settings(&config));

    HttpResponse::SeeOther()
        .insert_header((actix_web::http::header::LOCATION, Destination::Home.path()))
        .cookie(cookie)
        .cookie(Flash::info("You have been logged out.").to_cookie())
        .finish()
}
