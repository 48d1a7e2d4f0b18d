//! sl-contacts: contact repository client for SafeLink
//!
//! This crate wraps the remote contact REST API.
//!
//! ## Features
//!
//! - Paginated contact listing
//! - Contact creation, retrieval, update, and deletion
//! - Profile photo upload (multipart)
//! - In-memory store for tests and demo runs
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sl_contacts::{Contact, ContactApi, ContactStore};
//!
//! let api = ContactApi::new("http://localhost:8080/contacts", 30)?;
//!
//! // First page of contacts
//! let page = api.list_page(0, 10).await?;
//!
//! // Create a contact
//! let contact = Contact::new("John Doe")
//!     .with_email("john@example.com")
//!     .with_phone("(123)456-7890");
//! let saved = api.save(&contact).await?;
//! ```

pub mod client;
pub mod error;
pub mod memory;
pub mod models;
pub mod store;

pub use client::ContactApi;
pub use error::{ContactsError, Result};
pub use memory::InMemoryContactStore;
pub use models::{Contact, ContactPage};
pub use store::ContactStore;
