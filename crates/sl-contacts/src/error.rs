//! Error types for sl-contacts

use thiserror::Error;

/// sl-contacts error type
#[derive(Error, Debug)]
pub enum ContactsError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request never reached the server
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Contact not found: {0}")]
    NotFound(String),

    #[error("Page {page} out of range (total pages {total_pages})")]
    PageOutOfRange { page: u32, total_pages: u32 },

    #[error("Contact id required for {0}")]
    MissingId(&'static str),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ContactsError>;
