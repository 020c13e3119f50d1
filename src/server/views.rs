//! Page templates.
//!
//! Each struct is one page; the markup lives under `templates/` and every
//! page extends `layouts/main.html`.

use super::error::ServerResult;
use crate::error::FieldError;
use crate::models::{Contact, Employee};
use crate::services::{ContactForm, UpdateContactForm};
use askama::Template;
use axum::response::Html;

/// Render a template into an HTML response body.
pub fn render<T: Template>(page: &T) -> ServerResult<Html<String>> {
    Ok(Html(page.render()?))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct HomePage<'a> {
    pub staff: &'a [Employee],
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage;

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactListPage {
    pub contacts: Vec<Contact>,
    /// Flash messages queued under `msg`
    pub messages: Vec<String>,
}

#[derive(Template)]
#[template(path = "add-contact.html")]
pub struct AddContactPage {
    pub errors: Vec<FieldError>,
    /// Values to prefill; empty on first render
    pub form: ContactForm,
}

#[derive(Template)]
#[template(path = "edit-contact.html")]
pub struct EditContactPage {
    pub errors: Vec<FieldError>,
    pub contact: UpdateContactForm,
}

#[derive(Template)]
#[template(path = "detail-contact.html")]
pub struct DetailContactPage {
    pub contact: Option<Contact>,
}

impl From<Contact> for UpdateContactForm {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id.into_inner(),
            old_name: contact.name.clone(),
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}
