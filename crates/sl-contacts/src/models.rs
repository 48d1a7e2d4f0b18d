//! Data models for the contact API

use serde::{Deserialize, Serialize};

/// A single contact as exchanged with the server
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Contact {
    /// Server-assigned identifier, absent until the contact is persisted.
    /// Omitted from the payload on create so the save endpoint assigns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Full name
    #[serde(default)]
    pub name: String,
    /// Email address
    #[serde(default)]
    pub email: String,
    /// Job title
    #[serde(default)]
    pub title: String,
    /// Phone number, stored pre-formatted as (XXX)XXX-XXXX when it had
    /// exactly ten digits on entry
    #[serde(default)]
    pub phone: String,
    /// Postal address
    #[serde(default)]
    pub address: String,
    /// Free-text classifier, e.g. "Active" or "Inactive"
    #[serde(default)]
    pub status: String,
    /// Server-provided photo path
    #[serde(rename = "photoUrl", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Contact {
    /// Create a new contact with a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set job title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set phone number
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Set postal address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the status classifier
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Whether this contact has been persisted by the server
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// A server-returned window of contacts
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ContactPage {
    /// Contacts in server-defined order
    #[serde(default)]
    pub content: Vec<Contact>,
    /// Total number of pages
    #[serde(rename = "totalPages", default)]
    pub total_pages: u32,
    /// Total number of contacts across all pages
    #[serde(rename = "totalElements", default)]
    pub total_elements: u64,
}

impl ContactPage {
    /// Whether this page holds no contacts
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_builder() {
        let contact = Contact::new("John Doe")
            .with_email("john@example.com")
            .with_phone("(123)456-7890")
            .with_status("Active");

        assert_eq!(contact.name, "John Doe");
        assert_eq!(contact.email, "john@example.com");
        assert_eq!(contact.phone, "(123)456-7890");
        assert_eq!(contact.status, "Active");
        assert!(!contact.is_persisted());
    }

    #[test]
    fn test_contact_create_payload_omits_id() {
        let contact = Contact::new("Ann");
        let json = serde_json::to_value(&contact).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["name"], "Ann");
    }

    #[test]
    fn test_contact_update_payload_carries_id() {
        let contact = Contact {
            id: Some("c-1".to_string()),
            ..Contact::new("Ann")
        };
        let json = serde_json::to_value(&contact).unwrap();
        assert_eq!(json["id"], "c-1");
    }

    #[test]
    fn test_contact_wire_shape() {
        let json = r#"{
            "id": "c-1",
            "name": "Ann",
            "email": "ann@example.com",
            "title": "Engineer",
            "phone": "(123)456-7890",
            "address": "1 Main St",
            "status": "Active",
            "photoUrl": "http://localhost:8080/contacts/image/c-1.png"
        }"#;

        let contact: Contact = serde_json::from_str(json).unwrap();
        assert_eq!(contact.id.as_deref(), Some("c-1"));
        assert_eq!(
            contact.photo_url.as_deref(),
            Some("http://localhost:8080/contacts/image/c-1.png")
        );
    }

    #[test]
    fn test_page_wire_shape() {
        let json = r#"{
            "content": [{"name": "Ann"}, {"name": "Bob"}],
            "totalPages": 3,
            "totalElements": 25
        }"#;

        let page: ContactPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.content.len(), 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 25);
        assert!(!page.is_empty());
    }

    #[test]
    fn test_page_defaults() {
        let page: ContactPage = serde_json::from_str("{}").unwrap();
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
