//! Shared application data registered with every worker.

use std::sync::Arc;

use actix_web::web;
use gatehouse_auth::Flash;
use gatehouse_configs::AuthSettings;
use gatehouse_core::AccountService;
use gatehouse_store::UserRepository;

use crate::error::ApiError;
use crate::routes::configure_routes;

/// Handles to the shared services, cheap to clone into each worker.
#[derive(Clone)]
pub struct AppContext {
    pub accounts: web::Data<AccountService>,
    pub users: web::Data<Arc<dyn UserRepository>>,
    pub auth: web::Data<AuthSettings>,
}

impl AppContext {
    pub fn new(accounts: AccountService, auth: AuthSettings) -> Self {
        let users = accounts.repository().clone();
        Self {
            accounts: web::Data::new(accounts),
            users: web::Data::new(users),
            auth: web::Data::new(auth),
        }
    }

    /// Register app data, the form error handler and all routes.
    ///
    /// ```rust,ignore
    /// let ctx = AppContext::new(accounts, config.auth.clone());
    /// HttpServer::new(move || App::new().configure(|cfg| ctx.configure(cfg)))
    /// ```
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.accounts.clone())
            .app_data(self.users.clone())
            .app_data(self.auth.clone())
            .app_data(web::FormConfig::default().limit(16 * 1024).error_handler(
                |err, req| {
                    log::debug!("Rejected form on {}: {}", req.path(), err);
                    ApiError::redirect_with(
                        req.path(),
                        Flash::error("The form could not be processed. Please try again."),
                    )
                    .into()
                },
            ));

        configure_routes(cfg);
    }
}
