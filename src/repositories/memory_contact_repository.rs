use crate::domain::ContactId;
use crate::error::{StoreError, StoreResult};
use crate::models::{Contact, ContactFields};
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Contact repository kept in process memory.
///
/// Contacts are held in insertion order. The duplicate-name check and the
/// write happen under the same write lock, so two concurrent inserts with
/// the same name cannot both succeed. Cloning shares the underlying store.
#[derive(Clone, Default)]
pub struct InMemoryContactRepository {
    contacts: Arc<RwLock<Vec<Contact>>>,
}

impl InMemoryContactRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored contacts.
    pub fn len(&self) -> usize {
        self.read().map(|contacts| contacts.len()).unwrap_or(0)
    }

    /// Whether the repository holds no contacts.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<Contact>>> {
        self.contacts
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<Contact>>> {
        self.contacts
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn list_all(&self) -> StoreResult<Vec<Contact>> {
        Ok(self.read()?.clone())
    }

    async fn find_by_id(&self, id: &ContactId) -> StoreResult<Option<Contact>> {
        Ok(self.read()?.iter().find(|c| &c.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Contact>> {
        Ok(self.read()?.iter().find(|c| c.name == name).cloned())
    }

    async fn insert(&self, fields: &ContactFields) -> StoreResult<Contact> {
        let mut contacts = self.write()?;

        if contacts.iter().any(|c| c.name == fields.name) {
            return Err(StoreError::DuplicateName(fields.name.clone()));
        }

        let contact = fields.clone().into_contact(ContactId::generate());
        contacts.push(contact.clone());
        tracing::debug!(contact_id = %contact.id, "Inserted contact");
        Ok(contact)
    }

    async fn update_by_id(&self, id: &ContactId, fields: &ContactFields) -> StoreResult<()> {
        let mut contacts = self.write()?;

        let Some(index) = contacts.iter().position(|c| &c.id == id) else {
            tracing::debug!(contact_id = %id, "Update skipped, contact absent");
            return Ok(());
        };

        if contacts
            .iter()
            .any(|c| c.name == fields.name && &c.id != id)
        {
            return Err(StoreError::DuplicateName(fields.name.clone()));
        }

        contacts[index] = fields.clone().into_contact(id.clone());
        tracing::debug!(contact_id = %id, "Updated contact");
        Ok(())
    }

    async fn delete_by_id(&self, id: &ContactId) -> StoreResult<bool> {
        let mut contacts = self.write()?;
        let before = contacts.len();
        contacts.retain(|c| &c.id != id);
        Ok(contacts.len() < before)
    }
}
