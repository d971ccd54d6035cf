//! `gatehouse-server create-admin`
//!
//! Writes an approved, paid admin record into the configured store file.

use anyhow::{bail, Context, Result};
use gatehouse_configs::ServerConfig;
use log::info;

use crate::lifecycle::build_account_service;

/// Create an admin account.
///
/// # Returns
/// `true` when a record was written, `false` when an admin with that name
/// already existed.
pub async fn create_admin(config: &ServerConfig, username: &str, password: &str) -> Result<bool> {
    if username.trim().is_empty() {
        bail!("Admin username cannot be empty");
    }

    let accounts = build_account_service(config)?;
    let created = accounts
        .ensure_admin(username, password)
        .await
        .with_context(|| format!("Failed to create admin '{}'", username))?;

    if created {
        info!("Created admin '{}' in {}", username, config.storage.users_file);
    } else {
        info!("Admin '{}' already exists; nothing to do", username);
    }
    Ok(created)
}
