use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Config file not found")]
    NotFound,

    #[error("No API key configured. Set api_key in the config file or export {0}")]
    MissingApiKey(&'static str),

    #[error("Failed to create provider: {0}")]
    Provider(#[source] anyhow::Error),
}
