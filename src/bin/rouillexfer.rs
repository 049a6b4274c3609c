use anyhow::{bail, Result};
use clap::Parser;
use env_logger::{Builder, Env};
use rouillexferd::client::{self, Outcome, Request};
use std::io::Write;
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "rouillexfer", about = "A file transfer client for rouillexferd.")]
struct Cli {
    /// Server host
    server_host: String,

    /// Server control port
    server_port: u16,

    /// Local port to listen on for the server's data connection
    data_port: u16,

    /// List the server's directory
    #[arg(short = 'l', long, conflicts_with = "get", required_unless_present = "get")]
    list: bool,

    /// Fetch a file by name
    #[arg(short = 'g', long, value_name = "FILE")]
    get: Option<String>,

    /// Write the fetched file here instead of the remote name
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose mode
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

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

    if args.server_port < 1024 || args.data_port < 1024 {
        bail!("reserved ports disallowed");
    }

    let command = if args.get.is_some() { "GET" } else { "LIST" };
    let request = Request {
        host: args.server_host,
        server_port: args.server_port,
        data_port: args.data_port,
        command: command.to_string(),
        filename: args.get,
        output: args.output,
    };

    match client::execute(&request).await? {
        Outcome::Listing(listing) => print!("{}", listing),
        Outcome::Saved { path, bytes } => {
            println!("transfer complete: {} ({} bytes)", path.display(), bytes)
        }
        Outcome::NotFound(filename) => bail!("file {:?} not found on server", filename),
    }

    Ok(())
}
