use crate::domain::ContactId;
use crate::error::StoreResult;
use crate::models::{Contact, ContactFields};
use async_trait::async_trait;

/// Repository for managing contacts.
///
/// Provides abstraction over contact storage and retrieval,
/// enabling different implementations (MongoDB, in-memory, mock).
///
/// Implementations must reject an insert or update that would give two
/// contacts the same name with [`StoreError::DuplicateName`], atomically
/// with the write itself.
///
/// [`StoreError::DuplicateName`]: crate::error::StoreError::DuplicateName
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Every contact, in the store's natural order.
    async fn list_all(&self) -> StoreResult<Vec<Contact>>;

    /// Look up a contact by id. Ids the store could never have issued are
    /// reported as absent rather than as errors.
    async fn find_by_id(&self, id: &ContactId) -> StoreResult<Option<Contact>>;

    /// Look up the contact whose name matches exactly (case-sensitive).
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Contact>>;

    /// Store a new contact and return it with its assigned id.
    async fn insert(&self, fields: &ContactFields) -> StoreResult<Contact>;

    /// Replace name, email and phone of an existing contact.
    /// Does nothing if the contact does not exist.
    async fn update_by_id(&self, id: &ContactId, fields: &ContactFields) -> StoreResult<()>;

    /// Remove a contact, returning whether one was removed.
    async fn delete_by_id(&self, id: &ContactId) -> StoreResult<bool>;
}
