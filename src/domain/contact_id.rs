//! ContactId value object.

use super::errors::ValidationError;
use serde::{Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Opaque identifier assigned by the store when a contact is inserted.
///
/// The id is never interpreted outside the repository that issued it: the
/// MongoDB store uses the hex form of an `ObjectId`, the in-memory store a
/// UUID. The only rule enforced here is that it is not blank.
///
/// # Example
///
/// ```
/// use contact_book::domain::ContactId;
///
/// let id = ContactId::new("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
/// assert_eq!(id.as_str(), "65a1f0c2e4b0a1b2c3d4e5f6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactId(String);

impl ContactId {
    /// Create a new ContactId, rejecting blank input.
    ///
    /// Surrounding whitespace is trimmed, since ids arrive from form fields
    /// and path segments.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` if the provided ID is blank.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if trimmed.len() == id.len() {
            Ok(Self(id))
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    /// A fresh random id (UUID v4, 32 hex digits), for stores that do not
    /// assign their own.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parse a raw id from request input, mapping blank input to `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::new(raw).ok()
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for ContactId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
