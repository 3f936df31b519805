use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use common::store::StoreConfig;

/// Token secret used when nothing else is configured. Fine for local
/// development, useless for anything reachable from another machine.
pub const DEV_TOKEN_SECRET: &str = "ergon-dev-secret";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[derive(Parser, Debug)]
#[command(name = "ergond")]
#[command(about = "Per-user file storage service over a flat object store")]
pub struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Address to listen on (overrides the config file)
    #[arg(long)]
    pub listen: Option<SocketAddr>,
}

/// On-disk configuration; every field optional, defaults below.
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    listen_addr: Option<SocketAddr>,
    /// path to the sqlite user database; in-memory when unset
    sqlite_path: Option<PathBuf>,
    store: Option<StoreConfig>,
    token_secret: Option<String>,
    /// base URL prepended to object keys when emitting download links
    public_base_url: Option<String>,
    log_level: Option<String>,
    log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub sqlite_path: Option<PathBuf>,
    pub store: StoreConfig,
    pub token_secret: String,
    pub public_base_url: Option<String>,
    pub log_level: tracing::Level,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Assemble the runtime configuration: flags > environment > config
    /// file > defaults.
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let file = match &args.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                toml::from_str::<ConfigFile>(&raw)?
            }
            None => ConfigFile::default(),
        };

        let listen_addr = args
            .listen
            .or(file.listen_addr)
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.parse().expect("default listen addr parses"));

        let token_secret = std::env::var("ERGON_TOKEN_SECRET")
            .ok()
            .or(file.token_secret)
            .unwrap_or_else(|| DEV_TOKEN_SECRET.to_string());

        let log_level = match file.log_level.as_deref() {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidLogLevel(raw.to_string()))?,
            None => tracing::Level::INFO,
        };

        Ok(Self {
            listen_addr,
            sqlite_path: file.sqlite_path,
            store: file.store.unwrap_or_default(),
            token_secret,
            public_base_url: file.public_base_url,
            log_level,
            log_dir: file.log_dir,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
}
