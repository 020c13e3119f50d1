//! Contact service layer.
//!
//! Validation rules and CRUD orchestration for contacts. Handlers hand over
//! raw form submissions; the service decides whether they are acceptable and
//! talks to the repository.

use crate::domain::{ContactId, EmailAddress, PhoneLocale, PhoneNumber};
use crate::error::{FieldError, ServiceError, ServiceResult, StoreError, StoreResult};
use crate::models::{Contact, ContactFields};
use crate::observability::{ContactMutation, MetricsTracker};
use crate::repositories::ContactRepository;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

pub const NAME_REQUIRED: &str = "Name is required!";
pub const NAME_TAKEN: &str = "Name Already Exist!";
pub const INVALID_EMAIL: &str = "Invalid Email!";
pub const INVALID_PHONE: &str = "Invalid Phone Number!";

/// Fields submitted by the add-contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Fields submitted by the edit-contact form.
///
/// `old_name` is the name the contact had when the form was rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UpdateContactForm {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "oldName")]
    pub old_name: String,
    pub email: String,
    pub phone: String,
}

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Every stored contact.
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>>;

    /// The contact with this id, if any. Blank or foreign ids are absent.
    async fn get_contact(&self, id: &str) -> StoreResult<Option<Contact>>;

    /// Validate and store a new contact.
    ///
    /// Fails with [`ServiceError::Validation`] when the name is blank or
    /// taken, or when email or phone are malformed.
    async fn create_contact(&self, form: &ContactForm) -> ServiceResult<Contact>;

    /// Validate and apply an edit. An id that matches nothing is not an error.
    ///
    /// Keeping the contact's own name never counts as a duplicate.
    async fn update_contact(&self, form: &UpdateContactForm) -> ServiceResult<()>;

    /// Delete by id. Unknown ids are ignored.
    async fn delete_contact(&self, id: &str) -> StoreResult<()>;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repository: Arc<dyn ContactRepository>,
    phone_locale: PhoneLocale,
    metrics: MetricsTracker,
}

impl ContactServiceImpl {
    /// Create a new contact service.
    pub fn new(
        repository: Arc<dyn ContactRepository>,
        phone_locale: PhoneLocale,
        metrics: MetricsTracker,
    ) -> Self {
        Self {
            repository,
            phone_locale,
            metrics,
        }
    }

    /// Check every field and collect all failures, in field order.
    fn validate(
        &self,
        name: &str,
        name_taken: bool,
        email: &str,
        phone: &str,
    ) -> Result<ContactFields, Vec<FieldError>> {
        let mut errors = Vec::new();

        if name.trim().is_empty() {
            errors.push(FieldError::new("name", NAME_REQUIRED, name));
        } else if name_taken {
            errors.push(FieldError::new("name", NAME_TAKEN, name));
        }

        let email = EmailAddress::new(email)
            .map_err(|_| errors.push(FieldError::new("email", INVALID_EMAIL, email)))
            .ok();

        let phone = PhoneNumber::parse(phone, self.phone_locale)
            .map_err(|_| errors.push(FieldError::new("phone", INVALID_PHONE, phone)))
            .ok();

        match (errors.is_empty(), email, phone) {
            (true, Some(email), Some(phone)) => Ok(ContactFields::new(name, email, phone)),
            _ => Err(errors),
        }
    }

    fn reject(&self, form: &str, errors: Vec<FieldError>) -> ServiceError {
        self.metrics.track_validation_failure(form, errors.len());
        ServiceError::Validation(errors)
    }

    /// Translate a store-level uniqueness violation into a field error.
    fn map_write_error(&self, form: &str, name: &str, err: StoreError) -> ServiceError {
        match err {
            StoreError::DuplicateName(_) => {
                tracing::info!(name = %name, "Duplicate name rejected by store");
                self.reject(form, vec![FieldError::new("name", NAME_TAKEN, name)])
            }
            other => other.into(),
        }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn list_contacts(&self) -> StoreResult<Vec<Contact>> {
        self.repository.list_all().await
    }

    async fn get_contact(&self, id: &str) -> StoreResult<Option<Contact>> {
        match ContactId::parse(id) {
            Some(id) => self.repository.find_by_id(&id).await,
            None => Ok(None),
        }
    }

    async fn create_contact(&self, form: &ContactForm) -> ServiceResult<Contact> {
        let name_taken = !form.name.trim().is_empty()
            && self.repository.find_by_name(&form.name).await?.is_some();

        let fields = self
            .validate(&form.name, name_taken, &form.email, &form.phone)
            .map_err(|errors| self.reject("add-contact", errors))?;

        let contact = self
            .repository
            .insert(&fields)
            .await
            .map_err(|e| self.map_write_error("add-contact", &form.name, e))?;

        self.metrics.track_mutation(ContactMutation::Created);
        tracing::info!(contact_id = %contact.id, "Contact created");
        Ok(contact)
    }

    async fn update_contact(&self, form: &UpdateContactForm) -> ServiceResult<()> {
        let id = ContactId::parse(&form.id);

        let name_taken = if form.name != form.old_name && !form.name.trim().is_empty() {
            match self.repository.find_by_name(&form.name).await? {
                Some(existing) => id.as_ref() != Some(&existing.id),
                None => false,
            }
        } else {
            false
        };

        let fields = self
            .validate(&form.name, name_taken, &form.email, &form.phone)
            .map_err(|errors| self.reject("edit-contact", errors))?;

        let Some(id) = id else {
            tracing::debug!("Update without contact id ignored");
            return Ok(());
        };

        self.repository
            .update_by_id(&id, &fields)
            .await
            .map_err(|e| self.map_write_error("edit-contact", &form.name, e))?;

        self.metrics.track_mutation(ContactMutation::Updated);
        tracing::info!(contact_id = %id, "Contact updated");
        Ok(())
    }

    async fn delete_contact(&self, id: &str) -> StoreResult<()> {
        let Some(id) = ContactId::parse(id) else {
            tracing::debug!("Delete without contact id ignored");
            return Ok(());
        };

        if self.repository.delete_by_id(&id).await? {
            self.metrics.track_mutation(ContactMutation::Deleted);
            tracing::info!(contact_id = %id, "Contact deleted");
        } else {
            tracing::debug!(contact_id = %id, "Delete matched no contact");
        }
        Ok(())
    }
}
