//! Contact Book - a small server-rendered address book.
//!
//! Contacts (name, email, phone) are kept in MongoDB, or in memory for
//! local runs and tests, and managed through a handful of HTML pages.
//!
//! # Architecture
//!
//! - **domain**: Validated value objects (ids, email addresses, phone numbers)
//! - **models**: The stored contact and the home-page staff roster
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **repositories**: Contact storage behind the `ContactRepository` trait
//! - **services**: Validation rules and CRUD orchestration
//! - **session**: Cookie sessions and one-shot flash messages
//! - **cache**: The TTL cache backing the session store
//! - **observability**: Request counters and operation timing
//! - **server**: Routes, handlers, templates and the serve loop

pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod server;
pub mod services;
pub mod session;

// Re-export commonly used types
pub use cache::TimedCache;
pub use config::{Config, StorageBackend};
pub use error::{ConfigError, FieldError, ServiceError, StoreError};
pub use models::{Contact, ContactFields, Employee};
pub use observability::MetricsTracker;
pub use server::{build_app, run_server, App, AppState};
