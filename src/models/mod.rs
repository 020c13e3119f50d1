//! Data models for the contact book.

pub mod contact;
pub mod employee;

pub use contact::{Contact, ContactFields};
pub use employee::Employee;
