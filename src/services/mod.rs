//! Application service layer.
//!
//! Services hold the contact rules and sit between the HTTP handlers and the
//! repositories.

mod contact_service;

pub use contact_service::{
    ContactForm, ContactService, ContactServiceImpl, UpdateContactForm, INVALID_EMAIL,
    INVALID_PHONE, NAME_REQUIRED, NAME_TAKEN,
};
