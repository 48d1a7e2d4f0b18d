//! Shared field handling for the detail and creation forms

use sl_contacts::Contact;
use tracing::warn;

use crate::phone::format_phone;

/// Apply a single field edit to a contact.
///
/// Phone values are formatted before storing; unknown field names are
/// logged and ignored.
pub(crate) fn apply_field(contact: &mut Contact, field: &str, value: &str) {
    match field {
        "name" => contact.name = value.to_string(),
        "email" => contact.email = value.to_string(),
        "title" => contact.title = value.to_string(),
        "phone" => contact.phone = format_phone(value),
        "address" => contact.address = value.to_string(),
        "status" => contact.status = value.to_string(),
        other => warn!("Ignoring unknown contact field: {}", other),
    }
}

/// First required field that is empty, if any
pub(crate) fn missing_required(contact: &Contact) -> Option<&'static str> {
    let values = [
        ("name", &contact.name),
        ("email", &contact.email),
        ("phone", &contact.phone),
        ("address", &contact.address),
        ("title", &contact.title),
        ("status", &contact.status),
    ];
    values
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
}
