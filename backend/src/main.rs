// Gatehouse Server entrypoint
//!
//! Initialization and serving live in `lifecycle`; this file parses the
//! command line, loads configuration and sets up logging.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gatehouse_configs::ServerConfig;
use gatehouse_server::lifecycle::{bootstrap, run};
use gatehouse_server::{commands, logging};
use log::info;

#[derive(Debug, Parser)]
#[command(name = "gatehouse-server", version, about = "Gatehouse membership server")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "GATEHOUSE_CONFIG", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an approved admin account in the user store and exit
    CreateAdmin {
        #[arg(long)]
        username: String,
        #[arg(long, env = "GATEHOUSE_NEW_ADMIN_PASSWORD")]
        password: String,
    },
}

#[actix_web::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match ServerConfig::from_file(&cli.config) {
        Ok(cfg) => {
            eprintln!(
                "Loaded config from: {}",
                std::fs::canonicalize(&cli.config)
                    .unwrap_or_else(|_| cli.config.clone())
                    .display()
            );
            cfg
        },
        Err(e) => {
            eprintln!("FATAL: Failed to load {}: {:#}", cli.config.display(), e);
            eprintln!("Server cannot start without valid configuration");
            std::process::exit(1);
        },
    };

    // Logging before any other side effects
    logging::init_logging(&config.logging)?;

    if let Some(Command::CreateAdmin { username, password }) = cli.command {
        commands::create_admin(&config, &username, &password).await?;
        return Ok(());
    }

    let version = env!("CARGO_PKG_VERSION");
    let commit = env!("GIT_COMMIT_HASH");
    let build_date = env!("BUILD_DATE");

    info!("╔═══════════════════════════════════════════════════════════════╗");
    info!("║         Gatehouse Server v{:<37} ║", version);
    info!("╠═══════════════════════════════════════════════════════════════╣");
    info!("║  Commit:     {:<49} ║", commit);
    info!("║  Built:      {:<49} ║", build_date);
    info!("╚═══════════════════════════════════════════════════════════════╝");
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    let components = bootstrap(&config).await?;
    run(&config, components).await
}
