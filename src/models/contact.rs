//! Contact model: the single record the application stores.

use crate::domain::{ContactId, EmailAddress, PhoneNumber};
use serde::Serialize;

/// A stored contact.
///
/// Field values are kept as plain strings because a record read back from
/// the database is shown as-is, even if it predates the current validation
/// rules. New values only reach the store through [`ContactFields`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    /// Identifier assigned by the store on insert
    pub id: ContactId,

    /// Display name, unique across contacts
    pub name: String,

    /// Email address
    pub email: String,

    /// Mobile phone number
    pub phone: String,
}

/// The mutable part of a contact, after validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactFields {
    pub name: String,
    pub email: EmailAddress,
    pub phone: PhoneNumber,
}

impl ContactFields {
    pub fn new(name: impl Into<String>, email: EmailAddress, phone: PhoneNumber) -> Self {
        Self {
            name: name.into(),
            email,
            phone,
        }
    }

    /// Materialize a contact with the given id.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email.into_inner(),
            phone: self.phone.into_inner(),
        }
    }
}
