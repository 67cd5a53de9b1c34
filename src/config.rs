use serde::Deserialize;
use std::path::PathBuf;

const CONFIG_PATH: &str = "config.toml";

/// Application configuration, loaded from `config.toml` at startup.
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data/reviews.db")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.toml`, falling back to defaults
    /// if the file does not exist.
    pub fn load() -> anyhow::Result<Self> {
        match std::fs::read_to_string(CONFIG_PATH) {
            Ok(contents) => Ok(toml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self {
                server: ServerConfig::default(),
                database: DatabaseConfig::default(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
