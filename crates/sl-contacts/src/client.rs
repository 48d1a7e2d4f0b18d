//! REST client for the contact API
//!
//! Talks to the resource root `<base>/contacts` documented by the external
//! service: paginated listing, create-or-update, photo upload, delete.

use reqwest::Client;
use reqwest::StatusCode;
use tracing::{debug, error, info};

use crate::error::{ContactsError, Result};
use crate::models::{Contact, ContactPage};
use crate::store::ContactStore;

/// HTTP client for the contact API
#[derive(Clone)]
pub struct ContactApi {
    client: Client,
    base_url: String,
}

impl ContactApi {
    /// Create a new contact API client
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ContactsError::Configuration(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        info!("Contact API client initialized for: {}", base_url);

        Ok(Self { client, base_url })
    }

    /// Base resource URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn contact_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn error_from(status: StatusCode, response: reqwest::Response) -> ContactsError {
        let message = response.text().await.unwrap_or_default();
        ContactsError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait::async_trait]
impl ContactStore for ContactApi {
    async fn list_page(&self, page: u32, size: u32) -> Result<ContactPage> {
        debug!("Fetching contact page {} (size {})", page, size);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("page", page), ("size", size)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let err = Self::error_from(status, response).await;
            error!("List page failed: {}", err);
            return Err(err);
        }

        let contact_page: ContactPage = response
            .json()
            .await
            .map_err(|e| ContactsError::Parse(e.to_string()))?;

        info!(
            "Fetched page {} with {} contacts ({} total pages)",
            page,
            contact_page.content.len(),
            contact_page.total_pages
        );
        Ok(contact_page)
    }

    async fn get_by_id(&self, id: &str) -> Result<Contact> {
        let url = self.contact_url(id);

        debug!("Fetching contact: {}", id);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ContactsError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            let err = Self::error_from(status, response).await;
            error!("Get contact failed: {}", err);
            return Err(err);
        }

        let contact: Contact = response
            .json()
            .await
            .map_err(|e| ContactsError::Parse(e.to_string()))?;

        Ok(contact)
    }

    async fn save(&self, contact: &Contact) -> Result<Contact> {
        debug!(
            "Saving contact: {} ({})",
            contact.name,
            if contact.is_persisted() { "update" } else { "create" }
        );

        let response = self
            .client
            .post(&self.base_url)
            .json(contact)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let err = Self::error_from(status, response).await;
            error!("Save contact failed: {}", err);
            return Err(err);
        }

        let saved: Contact = response
            .json()
            .await
            .map_err(|e| ContactsError::Parse(e.to_string()))?;

        info!("Saved contact: {:?}", saved.id);
        Ok(saved)
    }

    async fn upload_photo(&self, id: &str, bytes: Vec<u8>, file_name: &str) -> Result<String> {
        let url = format!("{}/photo", self.base_url);

        debug!("Uploading photo for contact {}: {} bytes", id, bytes.len());

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(content_type_for(file_name))
            .map_err(|e| ContactsError::Parse(e.to_string()))?;

        let form = reqwest::multipart::Form::new()
            .text("id", id.to_string())
            .part("file", part);

        let response = self.client.put(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let err = Self::error_from(status, response).await;
            error!("Photo upload failed: {}", err);
            return Err(err);
        }

        let photo_url = response
            .text()
            .await
            .map_err(|e| ContactsError::Parse(e.to_string()))?;

        info!("Uploaded photo for contact: {}", id);
        Ok(photo_url)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.contact_url(id);

        debug!("Deleting contact: {}", id);

        let response = self.client.delete(&url).send().await?;

        let status = response.status();
        // Already gone counts as deleted
        if status == StatusCode::NOT_FOUND {
            debug!("Contact {} already deleted", id);
            return Ok(());
        }
        if !status.is_success() {
            let err = Self::error_from(status, response).await;
            error!("Delete contact failed: {}", err);
            return Err(err);
        }

        info!("Deleted contact: {}", id);
        Ok(())
    }
}

/// Content type for an uploaded photo, from its file extension
fn content_type_for(file_name: &str) -> &'static str {
    match file_name.rsplit('.').next().map(|ext| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}
