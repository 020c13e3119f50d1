//! Domain value objects and types.
//!
//! Type-safe wrappers for contact IDs, email addresses, and phone numbers.
//! Each one validates at construction time, so a value that exists is a
//! value that passed the format check.

pub mod contact_id;
pub mod email;
pub mod errors;
pub mod phone;

pub use contact_id::ContactId;
pub use email::EmailAddress;
pub use errors::ValidationError;
pub use phone::{PhoneLocale, PhoneNumber};
