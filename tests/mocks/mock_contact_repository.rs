use async_trait::async_trait;
use contact_book::domain::ContactId;
use contact_book::error::{StoreError, StoreResult};
use contact_book::models::{Contact, ContactFields};
use contact_book::repositories::ContactRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Keeps contacts in insertion order, counts calls per method, and can be
/// told to fail every call so the error paths above it can be exercised.
/// Unlike the real stores it does not enforce name uniqueness, which lets
/// tests observe exactly what the service checks on its own.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<Vec<Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    failing: Arc<Mutex<bool>>,
    next_id: Arc<Mutex<u64>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            failing: Arc::new(Mutex::new(false)),
            next_id: Arc::new(Mutex::new(1)),
        }
    }

    /// Add a contact to the mock repository.
    pub fn add_contact(&self, contact: Contact) {
        self.contacts.lock().unwrap().push(contact);
    }

    /// Seed a contact with a predictable id.
    pub fn seed(&self, id: &str, name: &str, email: &str, phone: &str) -> Contact {
        let contact = Contact {
            id: ContactId::new(id).unwrap(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        };
        self.add_contact(contact.clone());
        contact
    }

    /// Snapshot of the stored contacts.
    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    /// Make every subsequent call fail with `StoreError::Unavailable`.
    pub fn fail_all(&self) {
        *self.failing.lock().unwrap() = true;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) -> StoreResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        if *self.failing.lock().unwrap() {
            return Err(StoreError::Unavailable(format!("mock failure in {}", method)));
        }
        Ok(())
    }
}

impl Default for MockContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn list_all(&self) -> StoreResult<Vec<Contact>> {
        self.track_call("list_all")?;
        Ok(self.contacts())
    }

    async fn find_by_id(&self, id: &ContactId) -> StoreResult<Option<Contact>> {
        self.track_call("find_by_id")?;
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.iter().find(|c| &c.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Contact>> {
        self.track_call("find_by_name")?;
        let contacts = self.contacts.lock().unwrap();
        Ok(contacts.iter().find(|c| c.name == name).cloned())
    }

    async fn insert(&self, fields: &ContactFields) -> StoreResult<Contact> {
        self.track_call("insert")?;

        let id = {
            let mut next = self.next_id.lock().unwrap();
            let id = format!("mock-{}", *next);
            *next += 1;
            id
        };
        let contact = fields.clone().into_contact(ContactId::new(id).unwrap());
        self.contacts.lock().unwrap().push(contact.clone());
        Ok(contact)
    }

    async fn update_by_id(&self, id: &ContactId, fields: &ContactFields) -> StoreResult<()> {
        self.track_call("update_by_id")?;

        let mut contacts = self.contacts.lock().unwrap();
        if let Some(slot) = contacts.iter_mut().find(|c| &c.id == id) {
            *slot = fields.clone().into_contact(id.clone());
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &ContactId) -> StoreResult<bool> {
        self.track_call("delete_by_id")?;
        let mut contacts = self.contacts.lock().unwrap();
        let before = contacts.len();
        contacts.retain(|c| &c.id != id);
        Ok(contacts.len() < before)
    }
}
