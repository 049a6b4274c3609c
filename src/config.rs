use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_LISTEN_PORT};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Directory served to clients; LIST enumerates it and GET resolves
    /// filenames against it.
    #[serde(default = "default_serve_dir")]
    pub serve_dir: String,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
}

fn default_listen_port() -> u16 {
    DEFAULT_LISTEN_PORT
}

fn default_bind_address() -> String {
    String::from("0.0.0.0")
}

fn default_serve_dir() -> String {
    String::from(".")
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_port: default_listen_port(),
            bind_address: default_bind_address(),
            serve_dir: default_serve_dir(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
        }
    }
}

pub fn load_config(path: &str) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path))?;
    let config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse configuration file: {}", path))?;
    Ok(config)
}
