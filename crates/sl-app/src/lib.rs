//! sl-app: screen view-models for SafeLink
//!
//! Each screen owns its state exclusively and exposes pure query methods
//! plus explicit command methods; nothing here knows how the state is
//! rendered.
//!
//! - [`ListView`]: one page of contacts, pagination, client-side name search
//! - [`DetailView`]: a single contact's editable fields and photo
//! - [`ContactForm`]: the not-yet-persisted draft behind the creation modal

pub mod detail;
pub mod error;
mod fields;
pub mod form;
pub mod list;
pub mod phone;

pub use detail::DetailView;
pub use error::{AppError, Result};
pub use form::{ContactForm, PhotoUpload};
pub use list::{ListState, ListView, PageLink};
pub use phone::format_phone;
