use crate::domain::ContactId;
use crate::error::{StoreError, StoreResult};
use crate::models::{Contact, ContactFields};
use crate::observability::Timer;
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};

/// Collection holding contact documents.
pub const CONTACTS_COLLECTION: &str = "contacts";

/// Server error code for a unique index violation.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Contact as stored in MongoDB.
#[derive(Debug, Serialize, Deserialize)]
struct ContactDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    name: String,
    email: String,
    phone: String,
}

impl TryFrom<ContactDocument> for Contact {
    type Error = StoreError;

    fn try_from(document: ContactDocument) -> Result<Self, Self::Error> {
        let oid = document
            .id
            .ok_or_else(|| StoreError::MalformedDocument("missing _id".to_string()))?;
        let id = ContactId::new(oid.to_hex())
            .map_err(|e| StoreError::MalformedDocument(e.to_string()))?;

        Ok(Contact {
            id,
            name: document.name,
            email: document.email,
            phone: document.phone,
        })
    }
}

/// Contact repository backed by a MongoDB collection.
///
/// Holds a single driver handle for the life of the process. Name
/// uniqueness is enforced by a unique index on `name`, created on connect.
#[derive(Clone)]
pub struct MongoContactRepository {
    collection: Collection<ContactDocument>,
}

impl MongoContactRepository {
    /// Connect to `uri`, verify the server answers, and prepare the
    /// `contacts` collection of `database`.
    ///
    /// # Errors
    ///
    /// Fails if the URI is invalid or the server does not answer a ping.
    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);

        // The driver connects lazily; ping so an unreachable server fails startup.
        db.run_command(doc! { "ping": 1 }).await?;
        tracing::info!(database = %database, "Connected to MongoDB");

        let repo = Self {
            collection: db.collection(CONTACTS_COLLECTION),
        };
        repo.ensure_name_index().await;
        Ok(repo)
    }

    async fn ensure_name_index(&self) {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        if let Err(e) = self.collection.create_index(index).await {
            // Existing duplicate names block the index; the service pre-check still applies.
            tracing::warn!(error = %e, "Could not create unique index on contact name");
        }
    }

    /// Ids that are not ObjectId hex strings can never match a document.
    fn object_id(id: &ContactId) -> Option<ObjectId> {
        ObjectId::parse_str(id.as_str()).ok()
    }

    fn fields_document(fields: &ContactFields) -> Document {
        doc! {
            "name": fields.name.as_str(),
            "email": fields.email.as_str(),
            "phone": fields.phone.as_str(),
        }
    }

    fn map_write_error(err: MongoError, name: &str) -> StoreError {
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY_CODE =>
            {
                StoreError::DuplicateName(name.to_string())
            }
            _ => StoreError::Database(err),
        }
    }
}

#[async_trait]
impl ContactRepository for MongoContactRepository {
    async fn list_all(&self) -> StoreResult<Vec<Contact>> {
        let timer = Timer::new("contacts.find");
        let result: Result<Vec<ContactDocument>, MongoError> =
            match self.collection.find(doc! {}).await {
                Ok(cursor) => cursor.try_collect().await,
                Err(e) => Err(e),
            };
        timer.finish_with_status(result.is_ok());

        result?.into_iter().map(Contact::try_from).collect()
    }

    async fn find_by_id(&self, id: &ContactId) -> StoreResult<Option<Contact>> {
        let Some(oid) = Self::object_id(id) else {
            return Ok(None);
        };

        let timer = Timer::new("contacts.find_one_by_id");
        let result = self.collection.find_one(doc! { "_id": oid }).await;
        timer.finish_with_status(result.is_ok());

        result?.map(Contact::try_from).transpose()
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Contact>> {
        let timer = Timer::new("contacts.find_one_by_name");
        let result = self.collection.find_one(doc! { "name": name }).await;
        timer.finish_with_status(result.is_ok());

        result?.map(Contact::try_from).transpose()
    }

    async fn insert(&self, fields: &ContactFields) -> StoreResult<Contact> {
        let document = ContactDocument {
            id: None,
            name: fields.name.clone(),
            email: fields.email.as_str().to_string(),
            phone: fields.phone.as_str().to_string(),
        };

        let timer = Timer::new("contacts.insert_one");
        let result = self.collection.insert_one(document).await;
        timer.finish_with_status(result.is_ok());

        let inserted = result.map_err(|e| Self::map_write_error(e, &fields.name))?;
        let oid = inserted.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::MalformedDocument("inserted _id is not an ObjectId".to_string())
        })?;
        let id = ContactId::new(oid.to_hex())
            .map_err(|e| StoreError::MalformedDocument(e.to_string()))?;

        Ok(fields.clone().into_contact(id))
    }

    async fn update_by_id(&self, id: &ContactId, fields: &ContactFields) -> StoreResult<()> {
        let Some(oid) = Self::object_id(id) else {
            return Ok(());
        };

        let timer = Timer::new("contacts.update_one");
        let result = self
            .collection
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": Self::fields_document(fields) },
            )
            .await;
        timer.finish_with_status(result.is_ok());

        let outcome = result.map_err(|e| Self::map_write_error(e, &fields.name))?;
        tracing::debug!(contact_id = %id, matched = outcome.matched_count, "Updated contact");
        Ok(())
    }

    async fn delete_by_id(&self, id: &ContactId) -> StoreResult<bool> {
        let Some(oid) = Self::object_id(id) else {
            return Ok(false);
        };

        let timer = Timer::new("contacts.delete_one");
        let result = self.collection.delete_one(doc! { "_id": oid }).await;
        timer.finish_with_status(result.is_ok());

        let outcome = result?;
        tracing::debug!(contact_id = %id, deleted = outcome.deleted_count, "Deleted contact");
        Ok(outcome.deleted_count > 0)
    }
}
