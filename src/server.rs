use crate::config::Config;
use crate::core_network::network;
use anyhow::Result;
use log::{error, info};
use std::sync::Arc;

/// Runs the transfer daemon with the provided configuration.
///
/// This function logs the effective configuration and starts the accept
/// loop, which runs until the process is stopped.
///
/// # Arguments
///
/// * `config` - The server configuration.
///
/// # Returns
///
/// Result<(), anyhow::Error> indicating the success or failure of the operation.
pub async fn run(config: Config) -> Result<()> {
    info!("Starting server with config: {:?}", config);

    match network::start_server(Arc::new(config)).await {
        Ok(_) => info!("Server stopped."),
        Err(e) => {
            error!("Failed to start server: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
