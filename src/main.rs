use tracing::{error, info};

use bookmarl::web::WebServer;
use bookmarl::{Config, Database};

#[tokio::main]
async fn main() {
    let config_path =
        std::env::var("BOOKMARL_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

    // Load configuration
    let config = match Config::load_with_env(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load {config_path}: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            config.apply_env_overrides();
            config
        }
    };

    // Initialize logging
    if let Err(e) = bookmarl::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        bookmarl::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("{e}");
        std::process::exit(1);
    }

    info!("Bookmarl API");

    let db = match Database::open(&config.database.url, config.database.max_connections).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database: {e}");
            std::process::exit(1);
        }
    };

    let server = match WebServer::new(&config, &db) {
        Ok(server) => server,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    info!("Server configured on {}", server.addr());

    if let Err(e) = server.run().await {
        error!("Web server error: {e}");
        std::process::exit(1);
    }
}
