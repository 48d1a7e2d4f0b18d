//! Contact detail/edit view-model
//!
//! Owns one contact's editable fields. Submitting saves the contact and
//! re-fetches the canonical record; photo replacement uploads the file and
//! cache-busts only the local rendering copy of the URL.

use std::sync::Arc;

use chrono::Utc;
use sl_contacts::{Contact, ContactStore, ContactsError};
use tracing::error;

use crate::error::{AppError, Result};
use crate::fields::{apply_field, missing_required};

/// View-model for the contact detail screen
pub struct DetailView {
    store: Arc<dyn ContactStore>,
    contact: Contact,
}

impl DetailView {
    /// Create a detail view backed by the given store
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self {
            store,
            contact: Contact::default(),
        }
    }

    /// The contact currently on screen
    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    /// Load the canonical contact from the server
    pub async fn fetch(&mut self, id: &str) -> Result<()> {
        match self.store.get_by_id(id).await {
            Ok(contact) => {
                self.contact = contact;
                Ok(())
            }
            Err(e) => {
                error!("Failed to fetch contact {}: {}", id, e);
                Err(e.into())
            }
        }
    }

    /// Apply a single field edit.
    ///
    /// Phone values are formatted before storing; unknown fields are ignored.
    pub fn change(&mut self, field: &str, value: &str) {
        apply_field(&mut self.contact, field, value);
    }

    /// Check required-field presence; blocks submission before any network call
    pub fn validate(&self) -> Result<()> {
        match missing_required(&self.contact) {
            Some(field) => Err(AppError::Validation(field.to_string())),
            None => Ok(()),
        }
    }

    /// Save the edited contact and re-fetch the canonical record
    pub async fn submit(&mut self) -> Result<()> {
        self.validate()?;

        let id = self
            .contact
            .id
            .clone()
            .ok_or(ContactsError::MissingId("update"))?;

        if let Err(e) = self.store.save(&self.contact).await {
            error!("Failed to update contact {}: {}", id, e);
            return Err(e.into());
        }

        self.fetch(&id).await
    }

    /// Replace the contact's photo.
    ///
    /// Uploads the file, then appends `?updated_at=<epoch millis>` to the
    /// in-memory photo URL so the displayed image skips stale caches. The
    /// server's canonical URL is untouched; the next fetch restores it.
    pub async fn update_photo(&mut self, bytes: Vec<u8>, file_name: &str) -> Result<()> {
        let id = self
            .contact
            .id
            .clone()
            .ok_or(ContactsError::MissingId("photo upload"))?;

        let uploaded = match self.store.upload_photo(&id, bytes, file_name).await {
            Ok(url) => url,
            Err(e) => {
                error!("Failed to upload photo for {}: {}", id, e);
                return Err(e.into());
            }
        };

        let base = self.contact.photo_url.clone().unwrap_or(uploaded);
        self.contact.photo_url = Some(cache_busted(&base, Utc::now().timestamp_millis()));
        Ok(())
    }
}

/// Append a cache-busting query to a photo URL
pub fn cache_busted(url: &str, epoch_millis: i64) -> String {
    format!("{}?updated_at={}", url, epoch_millis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sl_contacts::InMemoryContactStore;

    async fn store_with_contact() -> (Arc<InMemoryContactStore>, String) {
        let store = InMemoryContactStore::new();
        let saved = store
            .save(
                &Contact::new("Ann")
                    .with_email("ann@example.com")
                    .with_phone("(123)456-7890")
                    .with_address("1 Main St")
                    .with_title("Engineer")
                    .with_status("Active"),
            )
            .await
            .unwrap();
        let id = saved.id.unwrap();
        (Arc::new(store), id)
    }

    #[tokio::test]
    async fn test_fetch_loads_contact() {
        let (store, id) = store_with_contact().await;
        let mut view = DetailView::new(store);

        view.fetch(&id).await.unwrap();
        assert_eq!(view.contact().name, "Ann");
        assert_eq!(view.contact().id.as_deref(), Some(id.as_str()));
    }

    #[tokio::test]
    async fn test_fetch_unknown_id() {
        let store: Arc<dyn ContactStore> = Arc::new(InMemoryContactStore::new());
        let mut view = DetailView::new(store);

        let err = view.fetch("missing").await.unwrap_err();
        assert!(matches!(err, AppError::Api(ContactsError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_change_formats_phone() {
        let (store, id) = store_with_contact().await;
        let mut view = DetailView::new(store);
        view.fetch(&id).await.unwrap();

        view.change("phone", "987 654 3210");
        assert_eq!(view.contact().phone, "(987)654-3210");

        view.change("phone", "12345");
        assert_eq!(view.contact().phone, "12345");
    }

    #[tokio::test]
    async fn test_change_unknown_field_ignored() {
        let (store, id) = store_with_contact().await;
        let mut view = DetailView::new(store);
        view.fetch(&id).await.unwrap();

        let before = view.contact().clone();
        view.change("nickname", "Annie");
        assert_eq!(*view.contact(), before);
    }

    #[tokio::test]
    async fn test_validation_blocks_submit() {
        let (store, id) = store_with_contact().await;
        let mut view = DetailView::new(store.clone());
        view.fetch(&id).await.unwrap();

        view.change("email", "");
        let err = view.submit().await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref f) if f == "email"));

        // Nothing reached the store
        let canonical = store.get_by_id(&id).await.unwrap();
        assert_eq!(canonical.email, "ann@example.com");
    }

    #[tokio::test]
    async fn test_submit_saves_and_refetches() {
        let (store, id) = store_with_contact().await;
        let mut view = DetailView::new(store.clone());
        view.fetch(&id).await.unwrap();

        view.change("title", "Manager");
        view.submit().await.unwrap();

        assert_eq!(view.contact().title, "Manager");
        let canonical = store.get_by_id(&id).await.unwrap();
        assert_eq!(canonical.title, "Manager");
    }

    #[tokio::test]
    async fn test_update_photo_cache_busts_locally() {
        let (store, id) = store_with_contact().await;
        let mut view = DetailView::new(store.clone());
        view.fetch(&id).await.unwrap();

        view.update_photo(vec![1, 2, 3], "ann.png").await.unwrap();

        let rendered = view.contact().photo_url.clone().unwrap();
        assert!(rendered.contains("?updated_at="));

        // The canonical URL carries no cache-busting query
        let canonical = store.get_by_id(&id).await.unwrap();
        let canonical_url = canonical.photo_url.unwrap();
        assert!(!canonical_url.contains("updated_at"));

        // Re-fetching restores the canonical URL
        view.fetch(&id).await.unwrap();
        assert_eq!(view.contact().photo_url.as_deref(), Some(canonical_url.as_str()));
    }

    #[tokio::test]
    async fn test_update_photo_requires_id() {
        let store: Arc<dyn ContactStore> = Arc::new(InMemoryContactStore::new());
        let mut view = DetailView::new(store);

        let err = view.update_photo(vec![], "x.png").await.unwrap_err();
        assert!(matches!(err, AppError::Api(ContactsError::MissingId(_))));
    }

    #[test]
    fn test_cache_busted() {
        assert_eq!(
            cache_busted("/contacts/image/c-1.png", 1700000000000),
            "/contacts/image/c-1.png?updated_at=1700000000000"
        );
    }
}
