use anyhow::{bail, Result};
use clap::Parser;
use env_logger::{Builder, Env};
use rouillexferd::config::{load_config, Config};
use rouillexferd::core_cli::Cli;
use rouillexferd::server;
use std::io::Write;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    // Initialize the logger with a custom format
    let default_filter = if args.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            let timestamp = buf.timestamp();
            writeln!(
                buf,
                "[{}] [{}] {}",
                timestamp,
                record.level(),
                record.args()
            )
        })
        .init();

    // Load configuration from the TOML file, falling back to defaults
    let mut config = if args.config.is_empty() {
        Config::default()
    } else {
        load_config(&args.config)?
    };

    // CLI overrides
    if let Some(port) = args.port {
        config.server.listen_port = port;
    }
    if let Some(serve_dir) = args.serve_dir {
        config.server.serve_dir = serve_dir;
    }

    if config.server.listen_port < 1024 {
        bail!(
            "reserved ports disallowed (port {})",
            config.server.listen_port
        );
    }

    // Run the transfer daemon
    server::run(config).await?;

    Ok(())
}
