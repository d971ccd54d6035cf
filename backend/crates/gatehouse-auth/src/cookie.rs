// Cookie handling for the HttpOnly session cookie

use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::HttpRequest;
use gatehouse_commons::AuthConstants;
use gatehouse_configs::AuthSettings;

/// Configuration for session cookies
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Whether to set the Secure flag (should be true behind HTTPS)
    pub secure: bool,
    /// Cookie path (default: "/")
    pub path: String,
    /// SameSite policy. Lax keeps the session on top-level navigation from
    /// other sites while still blocking cross-site form posts.
    pub same_site: SameSite,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: false,
            path: "/".to_string(),
            same_site: SameSite::Lax,
        }
    }
}

impl CookieConfig {
    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self {
            secure: settings.cookie_secure,
            ..Default::default()
        }
    }
}

/// Create the HttpOnly session cookie holding `token`.
pub fn create_session_cookie<'a>(
    token: &str,
    expires_in: chrono::Duration,
    config: &CookieConfig,
) -> Cookie<'a> {
    Cookie::build(AuthConstants::SESSION_COOKIE_NAME, token.to_string())
        .path(config.path.clone())
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site)
        .max_age(time::Duration::seconds(expires_in.num_seconds()))
        .finish()
}

/// Create a cookie that clears the session cookie.
///
/// Used during logout to remove the session from the browser.
pub fn create_logout_cookie<'a>(config: &CookieConfig) -> Cookie<'a> {
    Cookie::build(AuthConstants::SESSION_COOKIE_NAME, "")
        .path(config.path.clone())
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site)
        .max_age(time::Duration::ZERO)
        .expires(time::OffsetDateTime::UNIX_EPOCH)
        .finish()
}

/// Extract the session token from request cookies.
pub fn extract_session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(AuthConstants::SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}
