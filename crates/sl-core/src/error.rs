//! Error types for sl-core

use thiserror::Error;

/// Main error type for sl-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for sl-core
pub type Result<T> = std::result::Result<T, Error>;
