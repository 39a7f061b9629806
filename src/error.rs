//! Application error types
//!
//! Startup and lifecycle failures. Request handling never produces these:
//! handlers always answer with a response.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid address '{addr}': {source}")]
    Address {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, AppError>;
