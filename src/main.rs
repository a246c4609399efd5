use std::path::Path;

use tracing::{error, info};

use qaboard::{Config, Database, WebServer};

const CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    // Load configuration
    let config = if Path::new(CONFIG_PATH).exists() {
        match Config::load_with_env(CONFIG_PATH) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {CONFIG_PATH}: {e}");
                std::process::exit(1);
            }
        }
    } else {
        eprintln!("{CONFIG_PATH} not found. Using default configuration.");
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    };

    // Initialize logging
    if let Err(e) = qaboard::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        qaboard::logging::init_console_only(&config.logging.level);
    }

    info!("QABOARD - Question and Answer Board");

    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    let db = match Database::open(&config.database.path).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database {}: {}", config.database.path, e);
            std::process::exit(1);
        }
    };

    let server = match WebServer::new(&config, db) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to create web server: {}", e);
            std::process::exit(1);
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
        info!("Shutting down");
    };

    if let Err(e) = server.run(shutdown).await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
