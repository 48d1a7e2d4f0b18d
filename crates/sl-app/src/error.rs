//! Error types for sl-app

use sl_contacts::ContactsError;
use thiserror::Error;

/// sl-app error type
#[derive(Error, Debug)]
pub enum AppError {
    /// A required field was left empty; checked before any network call
    #[error("Required field missing: {0}")]
    Validation(String),

    /// The contact was persisted but its photo upload failed.
    ///
    /// The id is carried so the photo can be retried from the detail screen.
    #[error("Contact {id} was saved but the photo upload failed: {source}")]
    PartialCreate {
        id: String,
        #[source]
        source: ContactsError,
    },

    #[error(transparent)]
    Api(#[from] ContactsError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
