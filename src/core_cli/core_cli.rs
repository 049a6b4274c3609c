use clap::Parser;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "rouillexferd", about = "A file transfer daemon written in Rust.")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "")]
    pub config: String,

    /// Port to listen on (overrides the configuration file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Directory to serve (overrides the configuration file)
    #[arg(short, long)]
    pub serve_dir: Option<String>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}
