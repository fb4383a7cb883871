use serde::{Deserialize, Serialize};

use std::{
    env, fs,
    num::ParseIntError,
    path::{Path, PathBuf},
};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// PostgreSQL connection string, either key=value or URL form
    pub database_dsn: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0} environment variable is required")]
    MissingVar(&'static str),

    #[error("Failed to parse {0}: {1}")]
    InvalidPort(&'static str, ParseIntError),

    #[error(
        "Config file not found and environment variables are incomplete. \
         Tried: {tried} and environment variables. Error: {source}"
    )]
    NotFound {
        tried: String,
        source: Box<ConfigError>,
    },
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Builds the config from `PG_DSN`, `HOST` and `PORT`, looked up through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let database_dsn = lookup("PG_DSN").ok_or(ConfigError::MissingVar("PG_DSN"))?;

        let host = lookup("HOST").unwrap_or_else(default_host);

        let port = match lookup("PORT") {
            Some(port) => port
                .parse::<u16>()
                .map_err(|e| ConfigError::InvalidPort("PORT", e))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            database_dsn,
            host,
            port,
        })
    }
}

/// Config files to try, in order. `NOTES_API_CONFIG` comes first when set;
/// `config.example.yaml` is a template and is never read.
fn candidate_paths(explicit: Option<String>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = explicit.into_iter().map(PathBuf::from).collect();
    let default = PathBuf::from(DEFAULT_CONFIG_FILE);
    if !paths.contains(&default) {
        paths.push(default);
    }
    paths
}

fn first_existing(paths: &[PathBuf]) -> Option<&Path> {
    paths.iter().map(PathBuf::as_path).find(|path| path.exists())
}

/// Loads the first config file found, otherwise falls back to `PG_DSN`, `HOST` and `PORT`.
pub fn load_config() -> Result<Config, ConfigError> {
    let explicit = env::var("NOTES_API_CONFIG").ok();
    let candidates = candidate_paths(explicit.clone());

    if let Some(path) = first_existing(&candidates) {
        if let Some(wanted) = explicit.as_deref().filter(|wanted| Path::new(wanted) != path) {
            tracing::warn!(
                "Config file '{}' not found, falling back to '{}'",
                wanted,
                path.display()
            );
        }
        tracing::info!("Reading configuration from '{}'", path.display());
        return Config::from_yaml_file(path);
    }

    tracing::info!(
        "No config file found, attempting to load configuration from environment variables"
    );
    Config::from_lookup(|key| env::var(key).ok()).map_err(|e| ConfigError::NotFound {
        tried: candidates
            .iter()
            .map(|path| format!("'{}'", path.display()))
            .collect::<Vec<_>>()
            .join(", "),
        source: Box::new(e),
    })
}
