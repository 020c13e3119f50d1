//! Errors that end a request with a server error page.

use crate::error::StoreError;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// A failure the user cannot fix by resubmitting.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>500</h1><p>Something went wrong.</p>"),
        )
            .into_response()
    }
}
