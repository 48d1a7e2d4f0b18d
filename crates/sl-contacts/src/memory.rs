//! In-memory contact store
//!
//! Backs view-model tests and the demo mode of the console binary. Insertion
//! order is the server-defined order; ids are assigned on create.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use async_trait::async_trait;

use crate::error::{ContactsError, Result};
use crate::models::{Contact, ContactPage};
use crate::store::ContactStore;

/// In-memory implementation of [`ContactStore`]
#[derive(Debug, Default)]
pub struct InMemoryContactStore {
    contacts: Arc<RwLock<Vec<Contact>>>,
    photos: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryContactStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given contacts.
    ///
    /// Contacts without an id get one assigned, as the server would.
    pub async fn seeded(contacts: Vec<Contact>) -> Self {
        let store = Self::new();
        {
            let mut rows = store.contacts.write().await;
            for mut contact in contacts {
                if contact.id.is_none() {
                    contact.id = Some(uuid::Uuid::new_v4().to_string());
                }
                rows.push(contact);
            }
        }
        store
    }

    /// Number of stored contacts
    pub async fn len(&self) -> usize {
        self.contacts.read().await.len()
    }

    /// Whether the store holds no contacts
    pub async fn is_empty(&self) -> bool {
        self.contacts.read().await.is_empty()
    }

    /// Raw photo bytes uploaded for a contact, if any
    pub async fn photo_bytes(&self, id: &str) -> Option<Vec<u8>> {
        self.photos.read().await.get(id).cloned()
    }
}

impl Clone for InMemoryContactStore {
    fn clone(&self) -> Self {
        Self {
            contacts: Arc::clone(&self.contacts),
            photos: Arc::clone(&self.photos),
        }
    }
}

#[async_trait]
impl ContactStore for InMemoryContactStore {
    async fn list_page(&self, page: u32, size: u32) -> Result<ContactPage> {
        if size == 0 {
            return Err(ContactsError::Configuration(
                "page size must be positive".to_string(),
            ));
        }

        let rows = self.contacts.read().await;
        let total = rows.len();
        let size = size as usize;
        let total_pages = total.div_ceil(size) as u32;

        let start = (page as usize).saturating_mul(size);
        let content = if start < total {
            rows[start..start.saturating_add(size).min(total)].to_vec()
        } else {
            Vec::new()
        };

        Ok(ContactPage {
            content,
            total_pages,
            total_elements: total as u64,
        })
    }

    async fn get_by_id(&self, id: &str) -> Result<Contact> {
        let rows = self.contacts.read().await;
        rows.iter()
            .find(|c| c.id.as_deref() == Some(id))
            .cloned()
            .ok_or_else(|| ContactsError::NotFound(id.to_string()))
    }

    async fn save(&self, contact: &Contact) -> Result<Contact> {
        let mut rows = self.contacts.write().await;

        match &contact.id {
            Some(id) => {
                let row = rows
                    .iter_mut()
                    .find(|c| c.id.as_deref() == Some(id.as_str()))
                    .ok_or_else(|| ContactsError::NotFound(id.clone()))?;
                *row = contact.clone();
                Ok(row.clone())
            }
            None => {
                let mut created = contact.clone();
                created.id = Some(uuid::Uuid::new_v4().to_string());
                rows.push(created.clone());
                Ok(created)
            }
        }
    }

    async fn upload_photo(&self, id: &str, bytes: Vec<u8>, file_name: &str) -> Result<String> {
        let mut rows = self.contacts.write().await;
        let row = rows
            .iter_mut()
            .find(|c| c.id.as_deref() == Some(id))
            .ok_or_else(|| ContactsError::NotFound(id.to_string()))?;

        let ext = file_name.rsplit('.').next().unwrap_or("png");
        let photo_url = format!("/contacts/image/{}.{}", id, ext);
        row.photo_url = Some(photo_url.clone());

        self.photos.write().await.insert(id.to_string(), bytes);

        Ok(photo_url)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let mut rows = self.contacts.write().await;
        rows.retain(|c| c.id.as_deref() != Some(id));
        self.photos.write().await.remove(id);
        Ok(())
    }
}
