use ljmd::core::forcefield::params::{ParamError, ParamLoadError};
use ljmd::core::io::positions::PositionsError;
use ljmd::engine::config::ConfigError;
use ljmd::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error(transparent)]
    Positions(#[from] PositionsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ParamError> for CliError {
    fn from(e: ParamError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl From<ParamLoadError> for CliError {
    fn from(e: ParamLoadError) -> Self {
        match e {
            ParamLoadError::Io { source, .. } => CliError::Io(source),
            ParamLoadError::Toml { path, source } => CliError::FileParsing {
                path: PathBuf::from(path),
                source: source.into(),
            },
        }
    }
}
