//! Mindmetrics Insight Engine
//!
//! Loads both survey datasets once at startup and serves the
//! filter/aggregate/insight API over HTTP. The service holds no
//! mutable state beyond the loader cache and can be horizontally
//! scaled.

use dotenvy::dotenv;
use mindmetrics::config::{get_environment, Config};
use mindmetrics::core::http::start_server;
use mindmetrics::loader::{DataLoader, DatasetSchema};
use mindmetrics::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    let environment = get_environment();
    logging::init_logging(&environment);

    let config = Config::from_env();
    info!("Starting Mindmetrics Insight Engine");
    info!(environment = %environment, "Environment");
    info!(port = config.port, "HTTP Server: http://0.0.0.0:{}", config.port);

    let loader = DataLoader::new(config.data_dir.clone());
    let mental_health = loader.load(&config.mental_health_file, &DatasetSchema::mental_health())?;
    let career = loader.load(&config.career_file, &DatasetSchema::career())?;
    info!(
        mental_health = mental_health.len(),
        career = career.len(),
        "Survey datasets loaded"
    );

    let server_config = config.clone();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(&server_config, mental_health, career).await {
            error!(error = %e, "HTTP server error");
        }
    });

    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down insight engine...");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
