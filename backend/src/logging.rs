// Logging module, built on tracing-subscriber
//
// The crates log through the `log` macros; `tracing_log::LogTracer` routes
// those records into the tracing subscriber configured here.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::Context;
use gatehouse_configs::LoggingSettings;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name of the server log inside `logging.logs_path`
pub const SERVER_LOG_FILE: &str = "server.log";

/// Log format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact text format: timestamp LEVEL target - message
    Compact,
    /// JSON Lines format for structured logging
    Json,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Build the `EnvFilter` from the base level, hardcoded noisy-crate
/// overrides, and optional per-target overrides from config.
fn build_env_filter(
    level: &str,
    target_levels: Option<&HashMap<String, String>>,
) -> anyhow::Result<EnvFilter> {
    let mut directives = vec![level.to_string()];

    // Suppress noisy third-party crates
    let noisy: &[(&str, &str)] = &[
        ("actix_server", "warn"),
        ("actix_web", "warn"),
        ("actix_web::middleware::logger", "info"),
        ("actix_http", "warn"),
        ("mio", "warn"),
        ("tracing", "warn"),
    ];
    for (target, lvl) in noisy {
        directives.push(format!("{}={}", target, lvl));
    }

    // Per-target overrides from config.toml
    if let Some(map) = target_levels {
        for (target, lvl) in map.iter() {
            directives.push(format!("{}={}", target, lvl));
        }
    }

    let filter_str = directives.join(",");
    EnvFilter::try_new(&filter_str)
        .map_err(|e| anyhow::anyhow!("Invalid tracing filter '{}': {}", filter_str, e))
}

/// Install the global subscriber described by `settings`.
///
/// Writes to `{logs_path}/server.log` in compact text or JSON lines, and to
/// stderr with colors when `log_to_console` is set. `log::*` records from
/// every crate are bridged in through `LogTracer`.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    let log_format = LogFormat::from_str(&settings.format);
    let targets = Some(&settings.targets);

    fs::create_dir_all(&settings.logs_path)
        .with_context(|| format!("Failed to create log directory {}", settings.logs_path))?;
    let file_path = Path::new(&settings.logs_path).join(SERVER_LOG_FILE);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&file_path)
        .with_context(|| format!("Failed to open log file {}", file_path.display()))?;

    // A second call (tests) finds the bridge already installed.
    tracing_log::LogTracer::init().ok();

    let console_layer = if settings.log_to_console {
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(true)
                .with_filter(build_env_filter(&settings.level, targets)?),
        )
    } else {
        None
    };

    let file_layer = match log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_writer(log_file)
            .with_target(true)
            .with_thread_names(true)
            .with_filter(build_env_filter(&settings.level, targets)?)
            .boxed(),
        LogFormat::Compact => tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(false)
            .with_writer(log_file)
            .with_target(true)
            .with_thread_names(true)
            .with_filter(build_env_filter(&settings.level, targets)?)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::debug!(
        "Logging initialized: level={}, format={}, console={}, file={}",
        settings.level,
        settings.format,
        settings.log_to_console,
        file_path.display()
    );

    Ok(())
}
