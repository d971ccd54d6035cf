//! Actix-web extractor resolving the current user from the session cookie.
//!
//! # Setup
//!
//! Both the repository and the auth settings must be registered as app data:
//!
//! ```rust,ignore
//! App::new()
//!     .app_data(web::Data::new(user_repo.clone()))      // Arc<dyn UserRepository>
//!     .app_data(web::Data::new(config.auth.clone()))    // AuthSettings
//!     .service(my_handler)
//! ```
//!
//! The user record is reloaded from the store on every request, so status,
//! role and paid flag are always current. A missing, invalid, or expired
//! token, or a token naming an unknown user, all yield `CurrentUser(None)`.

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use gatehouse_commons::User;
use gatehouse_configs::AuthSettings;
use gatehouse_store::UserRepository;
use log::{debug, error, warn};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::cookie::extract_session_token;
use crate::session::validate_session_token;

#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn user(&self) -> Option<&User> {
        self.0.as_ref()
    }
}

impl FromRequest for CurrentUser {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let Some(token) = extract_session_token(&req) else {
                return Ok(CurrentUser(None));
            };

            let Some(settings) = req.app_data::<web::Data<AuthSettings>>() else {
                warn!("AuthSettings not registered as app data; treating request as anonymous");
                return Ok(CurrentUser(None));
            };

            let claims = match validate_session_token(&token, &settings.session_secret) {
                Ok(claims) => claims,
                Err(e) => {
                    debug!("Ignoring session cookie: {}", e);
                    return Ok(CurrentUser(None));
                },
            };

            let Some(repo) = req.app_data::<web::Data<Arc<dyn UserRepository>>>() else {
                warn!("UserRepository not registered as app data; treating request as anonymous");
                return Ok(CurrentUser(None));
            };

            match repo.get_user(&claims.username()).await {
                Ok(user) => Ok(CurrentUser(user)),
                Err(e) => {
                    error!("Failed to load session user '{}': {}", claims.sub, e);
                    Err(actix_web::error::ErrorInternalServerError("Failed to load user"))
                },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::create_session_token;
    use actix_web::cookie::Cookie;
    use actix_web::test::TestRequest;
    use gatehouse_commons::{AuthConstants, Role, UserName};
    use gatehouse_store::FileUserStore;
    use tempfile::TempDir;

    async fn request_with(
        token: Option<&str>,
        repo: Arc<dyn UserRepository>,
        settings: AuthSettings,
    ) -> CurrentUser {
        let mut req = TestRequest::default()
            .app_data(web::Data::new(repo))
            .app_data(web::Data::new(settings));
        if let Some(token) = token {
            req = req.cookie(Cookie::new(AuthConstants::SESSION_COOKIE_NAME, token.to_string()));
        }
        let (req, mut payload) = req.to_http_parts();
        CurrentUser::from_request(&req, &mut payload).await.unwrap()
    }

    #[actix_rt::test]
    async fn test_resolves_known_user() {
        let dir = TempDir::new().unwrap();
        let store = FileUserStore::open(dir.path().join("users.json")).unwrap();
        store
            .insert_user(User::new_applicant(UserName::new("alice"), "h".to_string()))
            .await
            .unwrap();
        let repo: Arc<dyn UserRepository> = Arc::new(store);
        let settings = AuthSettings::default();

        let (token, _) =
            create_session_token(&UserName::new("alice"), Role::User, Some(1), &settings.session_secret)
                .unwrap();

        let current = request_with(Some(&token), repo, settings).await;
        assert_eq!(current.user().map(|u| u.username.as_str()), Some("alice"));
    }

    #[actix_rt::test]
    async fn test_unknown_user_and_bad_token_are_anonymous() {
        let dir = TempDir::new().unwrap();
        let repo: Arc<dyn UserRepository> =
            Arc::new(FileUserStore::open(dir.path().join("users.json")).unwrap());
        let settings = AuthSettings::default();

        let (token, _) =
            create_session_token(&UserName::new("ghost"), Role::User, Some(1), &settings.session_secret)
                .unwrap();
        assert!(request_with(Some(&token), repo.clone(), settings.clone()).await.0.is_none());
        assert!(request_with(Some("garbage"), repo.clone(), settings.clone()).await.0.is_none());
        assert!(request_with(None, repo, settings).await.0.is_none());
    }
}
