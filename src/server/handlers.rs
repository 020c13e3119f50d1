//! Route handlers.
//!
//! Handlers stay thin and leave every contact rule to the service. Successful
//! writes redirect to the list with a flash message.

use super::error::ServerResult;
use super::views::{
    render, AboutPage, AddContactPage, ContactListPage, DetailContactPage, EditContactPage,
    HomePage,
};
use super::AppState;
use crate::error::ServiceError;
use crate::services::{ContactForm, UpdateContactForm};
use crate::session::Flash;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

/// Flash key read by the contact list.
pub const FLASH_KEY: &str = "msg";

pub const CONTACT_ADDED: &str = "Contact successfully added!";
pub const CONTACT_DELETED: &str = "Contact successfully deleted!";
pub const CONTACT_UPDATED: &str = "Contact successfully updated!";

/// Body of every 404 response.
pub const NOT_FOUND_BODY: &str = "<h1>404</h1>";

const CONTACT_LIST: &str = "/contact";

/// Body of the delete form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteContactForm {
    #[serde(rename = "_id")]
    pub id: String,
}

/// GET /
pub async fn home(State(state): State<AppState>) -> ServerResult<Html<String>> {
    render(&HomePage {
        staff: &state.staff,
    })
}

/// GET /about
pub async fn about() -> ServerResult<Html<String>> {
    render(&AboutPage)
}

/// GET /contact
///
/// The only page that consumes flash messages.
pub async fn list_contacts(
    State(state): State<AppState>,
    flash: Flash,
) -> ServerResult<Html<String>> {
    let contacts = state.contacts.list_contacts().await?;
    let messages = flash.take(FLASH_KEY);
    render(&ContactListPage { contacts, messages })
}

/// GET /contact/add
pub async fn add_contact_form() -> ServerResult<Html<String>> {
    render(&AddContactPage {
        errors: Vec::new(),
        form: ContactForm::default(),
    })
}

/// POST /contact
pub async fn create_contact(
    State(state): State<AppState>,
    flash: Flash,
    Form(form): Form<ContactForm>,
) -> ServerResult<Response> {
    match state.contacts.create_contact(&form).await {
        Ok(_) => {
            flash.push(FLASH_KEY, CONTACT_ADDED);
            Ok(Redirect::to(CONTACT_LIST).into_response())
        }
        Err(ServiceError::Validation(errors)) => {
            Ok(render(&AddContactPage { errors, form })?.into_response())
        }
        Err(ServiceError::Store(err)) => Err(err.into()),
    }
}

/// DELETE /contact
pub async fn delete_contact(
    State(state): State<AppState>,
    flash: Flash,
    Form(form): Form<DeleteContactForm>,
) -> ServerResult<Redirect> {
    state.contacts.delete_contact(&form.id).await?;
    flash.push(FLASH_KEY, CONTACT_DELETED);
    Ok(Redirect::to(CONTACT_LIST))
}

/// GET /contact/edit/{id}
pub async fn edit_contact_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Response> {
    match state.contacts.get_contact(&id).await? {
        Some(contact) => Ok(render(&EditContactPage {
            errors: Vec::new(),
            contact: contact.into(),
        })?
        .into_response()),
        None => {
            tracing::debug!(contact_id = %id, "Edit requested for unknown contact");
            Ok(not_found().await.into_response())
        }
    }
}

/// PUT /contact
pub async fn update_contact(
    State(state): State<AppState>,
    flash: Flash,
    Form(form): Form<UpdateContactForm>,
) -> ServerResult<Response> {
    match state.contacts.update_contact(&form).await {
        Ok(()) => {
            flash.push(FLASH_KEY, CONTACT_UPDATED);
            Ok(Redirect::to(CONTACT_LIST).into_response())
        }
        Err(ServiceError::Validation(errors)) => Ok(render(&EditContactPage {
            errors,
            contact: form,
        })?
        .into_response()),
        Err(ServiceError::Store(err)) => Err(err.into()),
    }
}

/// GET /contact/{id}
pub async fn contact_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Html<String>> {
    let contact = state.contacts.get_contact(&id).await?;
    render(&DetailContactPage { contact })
}

/// Anything no route or static file answers.
pub async fn not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_BODY))
}
