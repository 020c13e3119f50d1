mod memory_contact_repository;
mod mongo_contact_repository;
mod traits;

pub use memory_contact_repository::InMemoryContactRepository;
pub use mongo_contact_repository::{MongoContactRepository, CONTACTS_COLLECTION};
pub use traits::ContactRepository;
