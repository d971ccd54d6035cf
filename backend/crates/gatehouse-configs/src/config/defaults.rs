// Default value functions

pub fn default_host() -> String {
    "127.0.0.1".to_string()
}

pub fn default_port() -> u16 {
    8080
}

pub fn default_workers() -> usize {
    0 // 0 = one worker per CPU core
}

pub fn default_true() -> bool {
    true
}

pub fn default_users_file() -> String {
    "./data/users.json".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_logs_path() -> String {
    "./logs".to_string()
}

pub fn default_log_format() -> String {
    "compact".to_string()
}

pub fn default_session_secret() -> String {
    // Development-only value; the server warns at startup while it is in use
    "gatehouse-dev-secret-change-me".to_string()
}

pub fn default_session_expiry_hours() -> i64 {
    24
}

pub fn default_bcrypt_cost() -> u32 {
    12
}

pub fn default_pass_mark() -> u8 {
    70
}
