//! Repository trait for contact persistence

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Contact, ContactPage};

/// Contact persistence operations.
///
/// Implemented by [`crate::ContactApi`] against the remote REST service and
/// by [`crate::InMemoryContactStore`] for tests and demo runs. No
/// implementation retries; every failure propagates once to the caller.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Fetch one page of contacts
    async fn list_page(&self, page: u32, size: u32) -> Result<ContactPage>;

    /// Fetch a single contact by id
    async fn get_by_id(&self, id: &str) -> Result<Contact>;

    /// Create or update a contact.
    ///
    /// The server distinguishes by presence of `id` in the payload; the
    /// returned contact carries the server-assigned id on create.
    async fn save(&self, contact: &Contact) -> Result<Contact>;

    /// Upload a profile photo for an already-persisted contact.
    ///
    /// Returns the new photo URL.
    async fn upload_photo(&self, id: &str, bytes: Vec<u8>, file_name: &str) -> Result<String>;

    /// Delete a contact. Deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<()>;
}
