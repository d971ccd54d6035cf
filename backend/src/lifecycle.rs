//! Server bootstrap and HTTP serving.
//!
//! `bootstrap` opens the user store, loads the question bank and seeds the
//! configured admin; `run` serves the app until the process is signalled.

use std::sync::Arc;

use actix_web::{App, HttpServer};
use anyhow::{Context, Result};
use gatehouse_api::AppContext;
use gatehouse_configs::ServerConfig;
use gatehouse_core::{AccountService, QuestionBank};
use gatehouse_store::{FileUserStore, UserRepository};
use log::{info, warn};

use crate::middleware;

/// Everything the HTTP layer needs, built once at startup.
pub struct ApplicationComponents {
    pub app_context: AppContext,
}

/// Load the question bank named by `evaluation.questions_path`, or the
/// built-in bank when none is configured.
pub fn load_question_bank(config: &ServerConfig) -> Result<QuestionBank> {
    match &config.evaluation.questions_path {
        Some(path) => {
            let bank = QuestionBank::from_toml_file(path)
                .with_context(|| format!("Failed to load question bank from {}", path))?;
            info!("Loaded {} evaluation questions from {}", bank.len(), path);
            Ok(bank)
        },
        None => {
            let bank = QuestionBank::builtin();
            info!("Using built-in evaluation ({} questions)", bank.len());
            Ok(bank)
        },
    }
}

/// Build the account service over the configured store file.
pub fn build_account_service(config: &ServerConfig) -> Result<AccountService> {
    let store = FileUserStore::open(&config.storage.users_file)
        .with_context(|| format!("Failed to open user store {}", config.storage.users_file))?;
    info!("User store: {} ({} users)", store.path().display(), store.len());

    let repo: Arc<dyn UserRepository> = Arc::new(store);
    let bank = Arc::new(load_question_bank(config)?);

    Ok(AccountService::new(repo, bank, &config.auth, &config.evaluation))
}

/// Prepare application state.
pub async fn bootstrap(config: &ServerConfig) -> Result<ApplicationComponents> {
    let accounts = build_account_service(config)?;

    if let (Some(username), Some(password)) =
        (&config.auth.admin_username, &config.auth.admin_password)
    {
        let created = accounts
            .ensure_admin(username, password)
            .await
            .with_context(|| format!("Failed to seed admin '{}'", username))?;
        if created {
            info!("Seeded admin account '{}' from configuration", username);
        }
    }

    let pending = accounts.pending_applications().await?.len();
    if pending > 0 {
        info!("{} application(s) awaiting approval", pending);
    }

    if config.uses_default_secret() {
        warn!(
            "auth.session_secret is the built-in development value; set GATEHOUSE_SESSION_SECRET \
             before exposing this server"
        );
    }

    Ok(ApplicationComponents {
        app_context: AppContext::new(accounts, config.auth.clone()),
    })
}

/// Serve HTTP until the server is stopped (Ctrl+C / SIGTERM).
pub async fn run(config: &ServerConfig, components: ApplicationComponents) -> Result<()> {
    let bind_addr = config.bind_addr();
    let workers = if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    };
    info!("Starting HTTP server on {} with {} workers", bind_addr, workers);

    let app_context = components.app_context;

    HttpServer::new(move || {
        let ctx = app_context.clone();
        App::new()
            .wrap(middleware::security_headers())
            .wrap(middleware::request_logger())
            .configure(move |cfg| ctx.configure(cfg))
    })
    .workers(workers)
    .bind(&bind_addr)
    .with_context(|| format!("Failed to bind {}", bind_addr))?
    .run()
    .await
    .context("HTTP server terminated with an error")?;

    info!("Server stopped");
    Ok(())
}
