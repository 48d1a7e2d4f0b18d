//! Creation form draft
//!
//! The not-yet-persisted contact behind the "Add New Contact" modal, plus
//! the two-phase create: save the fields, then upload the pending photo
//! keyed by the returned id.

use sl_contacts::{Contact, ContactStore};
use tracing::error;

use crate::error::{AppError, Result};
use crate::fields::{apply_field, missing_required};

/// A photo file waiting to be uploaded with the draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

/// Transient contact draft; exists only client-side
#[derive(Debug, Default)]
pub struct ContactForm {
    contact: Contact,
    pending_photo: Option<PhotoUpload>,
}

impl ContactForm {
    /// Create an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// The draft's current field values
    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    /// The photo selected for upload, if any
    pub fn pending_photo(&self) -> Option<&PhotoUpload> {
        self.pending_photo.as_ref()
    }

    /// Apply a single field edit; phone values are formatted before storing
    pub fn change(&mut self, field: &str, value: &str) {
        apply_field(&mut self.contact, field, value);
    }

    /// Attach a photo file to upload after the contact is created
    pub fn attach_photo(&mut self, bytes: Vec<u8>, file_name: impl Into<String>) {
        self.pending_photo = Some(PhotoUpload {
            bytes,
            file_name: file_name.into(),
        });
    }

    /// Discard all field values and the pending photo
    pub fn reset(&mut self) {
        self.contact = Contact::default();
        self.pending_photo = None;
    }

    /// Check required-field presence; blocks submission before any network call
    pub fn validate(&self) -> Result<()> {
        match missing_required(&self.contact) {
            Some(field) => Err(AppError::Validation(field.to_string())),
            None => Ok(()),
        }
    }

    /// Two-phase create: persist the fields, then the photo.
    ///
    /// A photo failure after a successful save leaves the contact persisted
    /// without its photo and reports [`AppError::PartialCreate`] carrying the
    /// new id; no compensating delete is attempted. On full success the
    /// draft is reset and the persisted contact returned.
    pub async fn submit(&mut self, store: &dyn ContactStore) -> Result<Contact> {
        self.validate()?;

        let saved = match store.save(&self.contact).await {
            Ok(saved) => saved,
            Err(e) => {
                error!("Failed to create contact: {}", e);
                return Err(e.into());
            }
        };

        let id = saved
            .id
            .clone()
            .ok_or_else(|| sl_contacts::ContactsError::Parse(
                "server returned a created contact without an id".to_string(),
            ))?;

        if let Some(photo) = &self.pending_photo {
            if let Err(e) = store
                .upload_photo(&id, photo.bytes.clone(), &photo.file_name)
                .await
            {
                error!("Photo upload failed after creating contact {}: {}", id, e);
                return Err(AppError::PartialCreate { id, source: e });
            }
        }

        self.reset();
        Ok(saved)
    }
}
