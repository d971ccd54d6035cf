use super::defaults::default_session_secret;
use super::types::ServerConfig;
use std::env;
use std::fs;
use std::path::Path;

const VALID_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const VALID_FORMATS: [&str; 2] = ["compact", "json"];
const MAX_SESSION_EXPIRY_HOURS: i64 = 24 * 365;

impl ServerConfig {
    /// Load configuration from a TOML file, apply `GATEHOUSE_*` environment
    /// overrides, then validate.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let mut config = Self::from_toml_str(&content)?;
        config.apply_env_overrides()?;
        config.finalize()?;

        Ok(config)
    }

    /// Parse configuration from TOML text without env overrides or validation.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }

    /// Apply environment variable overrides.
    ///
    /// Supported environment variables:
    /// - GATEHOUSE_SERVER_HOST: Override server.host
    /// - GATEHOUSE_SERVER_PORT: Override server.port
    /// - GATEHOUSE_USERS_FILE: Override storage.users_file
    /// - GATEHOUSE_LOG_LEVEL: Override logging.level
    /// - GATEHOUSE_LOG_TO_CONSOLE: Override logging.log_to_console
    /// - GATEHOUSE_SESSION_SECRET: Override auth.session_secret
    /// - GATEHOUSE_ADMIN_USERNAME / GATEHOUSE_ADMIN_PASSWORD: Override the seeded admin
    ///
    /// Environment variables take precedence over config.toml values.
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Ok(host) = env::var("GATEHOUSE_SERVER_HOST") {
            self.server.host = host;
        }

        if let Ok(port_str) = env::var("GATEHOUSE_SERVER_PORT") {
            self.server.port = port_str
                .parse()
                .map_err(|_| anyhow::anyhow!("Invalid GATEHOUSE_SERVER_PORT value: {}", port_str))?;
        }

        if let Ok(path) = env::var("GATEHOUSE_USERS_FILE") {
            self.storage.users_file = path;
        }

        if let Ok(level) = env::var("GATEHOUSE_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(val) = env::var("GATEHOUSE_LOG_TO_CONSOLE") {
            self.logging.log_to_console =
                val.eq_ignore_ascii_case("true") || val == "1" || val.eq_ignore_ascii_case("yes");
        }

        if let Ok(secret) = env::var("GATEHOUSE_SESSION_SECRET") {
            self.auth.session_secret = secret;
        }

        if let Ok(username) = env::var("GATEHOUSE_ADMIN_USERNAME") {
            self.auth.admin_username = Some(username);
        }
        if let Ok(password) = env::var("GATEHOUSE_ADMIN_PASSWORD") {
            self.auth.admin_password = Some(password);
        }

        Ok(())
    }

    /// Normalize and validate configuration.
    ///
    /// Call this after applying environment overrides.
    pub fn finalize(&mut self) -> anyhow::Result<()> {
        self.logging.level = self.logging.level.to_lowercase();
        self.logging.format = self.logging.format.to_lowercase();

        self.validate()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        if !VALID_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                VALID_LEVELS.join(", ")
            ));
        }

        if !VALID_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                VALID_FORMATS.join(", ")
            ));
        }

        for (target, level) in &self.logging.targets {
            if !VALID_LEVELS.contains(&level.as_str()) {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}' for target '{}'. Must be one of: {}",
                    level,
                    target,
                    VALID_LEVELS.join(", ")
                ));
            }
        }

        if self.storage.users_file.trim().is_empty() {
            return Err(anyhow::anyhow!("storage.users_file cannot be empty"));
        }

        if self.auth.session_secret.is_empty() {
            return Err(anyhow::anyhow!("auth.session_secret cannot be empty"));
        }

        if !(1..=MAX_SESSION_EXPIRY_HOURS).contains(&self.auth.session_expiry_hours) {
            return Err(anyhow::anyhow!(
                "auth.session_expiry_hours must be between 1 and {}, got {}",
                MAX_SESSION_EXPIRY_HOURS,
                self.auth.session_expiry_hours
            ));
        }

        // bcrypt accepts costs 4..=31
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(anyhow::anyhow!(
                "auth.bcrypt_cost must be between 4 and 31, got {}",
                self.auth.bcrypt_cost
            ));
        }

        if self.auth.admin_username.is_some() != self.auth.admin_password.is_some() {
            return Err(anyhow::anyhow!(
                "auth.admin_username and auth.admin_password must be set together"
            ));
        }

        if self.evaluation.pass_mark > 100 {
            return Err(anyhow::anyhow!(
                "evaluation.pass_mark must be between 0 and 100, got {}",
                self.evaluation.pass_mark
            ));
        }

        Ok(())
    }

    /// True while the built-in development session secret is configured.
    pub fn uses_default_secret(&self) -> bool {
        self.auth.session_secret == default_session_secret()
    }

    /// `host:port` to bind the HTTP listener to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
