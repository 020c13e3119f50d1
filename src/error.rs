//! Error types for the contact book.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors raised by a contact store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The MongoDB driver reported a failure
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// The store refused a write because another contact already has the name
    #[error("A contact named {0:?} already exists")]
    DuplicateName(String),

    /// A stored document could not be turned into a contact
    #[error("Malformed contact document: {0}")]
    MalformedDocument(String),

    /// The in-memory store's lock was poisoned by a panicking writer
    #[error("Contact store is unavailable: {0}")]
    Unavailable(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// One rejected form field, in the shape the form templates render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the form field (`name`, `email`, `phone`)
    pub param: &'static str,
    /// Message shown to the user
    pub msg: &'static str,
    /// The submitted value
    pub value: String,
}

impl FieldError {
    pub fn new(param: &'static str, msg: &'static str, value: impl Into<String>) -> Self {
        Self {
            param,
            msg,
            value: value.into(),
        }
    }
}

/// Errors returned by the contact service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The submission failed one or more field checks; the user can fix it
    #[error("Validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// The store failed; the request cannot be completed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;
