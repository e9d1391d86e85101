use tracing::{error, info, warn};

use gitgallery::{Config, WebServer};

/// Environment variable selecting the configuration file.
const CONFIG_PATH_ENV: &str = "GITGALLERY_CONFIG";

#[tokio::main]
async fn main() {
    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());

    // Load configuration
    let mut config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = gitgallery::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        gitgallery::logging::init_console_only(&config.logging.level);
    }

    config.apply_env_overrides();

    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    if config.uses_placeholder_token() {
        warn!("GITHUB_TOKEN is not set; requests will use the placeholder credential");
    }

    info!("gitgallery {}", env!("CARGO_PKG_VERSION"));

    let server = match WebServer::from_config(&config) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to create web server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}
