use super::defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Main server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub evaluation: EvaluationSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of actix workers (0 = number of CPU cores)
    #[serde(default = "default_workers")]
    pub workers: usize,
}

/// Flat-file user store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// JSON file holding every user record, rewritten on each mutation
    #[serde(default = "default_users_file")]
    pub users_file: String,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Directory for server.log
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    #[serde(default = "default_true")]
    pub log_to_console: bool,
    /// "compact" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
    /// Per-target level overrides, e.g. `gatehouse_api = "debug"`
    #[serde(default)]
    pub targets: HashMap<String, String>,
}

/// Session and password settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// HMAC secret used to sign session tokens
    #[serde(default = "default_session_secret")]
    pub session_secret: String,

    /// Session lifetime in hours (default: 24, at most one year)
    #[serde(default = "default_session_expiry_hours")]
    pub session_expiry_hours: i64,

    /// Set the Secure flag on cookies (enable behind HTTPS)
    #[serde(default)]
    pub cookie_secure: bool,

    /// bcrypt cost factor (4..=31)
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Admin account created at startup when both fields are set. Startup
    /// fails if the name belongs to a non-admin user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
}

/// Evaluation gate settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSettings {
    /// Minimum score (percent) that moves an applicant to pending approval
    #[serde(default = "default_pass_mark")]
    pub pass_mark: u8,

    /// Optional TOML question bank replacing the built-in questions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions_path: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: default_workers(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            users_file: default_users_file(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            logs_path: default_logs_path(),
            log_to_console: true,
            format: default_log_format(),
            targets: HashMap::new(),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            session_secret: default_session_secret(),
            session_expiry_hours: default_session_expiry_hours(),
            cookie_secure: false,
            bcrypt_cost: default_bcrypt_cost(),
            admin_username: None,
            admin_password: None,
        }
    }
}

impl Default for EvaluationSettings {
    fn default() -> Self {
        Self {
            pass_mark: default_pass_mark(),
            questions_path: None,
        }
    }
}
