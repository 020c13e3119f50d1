use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::fmt;
use uuid::Uuid;

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "contact_book.sid";

/// Identifier of one browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// A fresh random session id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a cookie value; anything that is not a UUID is rejected.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attach a [`SessionId`] to every request and keep the session cookie set.
///
/// A missing or malformed cookie starts a new session. The id is inserted
/// into the request extensions, where the [`Flash`](super::Flash) extractor
/// picks it up.
pub async fn session_middleware(jar: CookieJar, mut req: Request, next: Next) -> Response {
    let existing = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| SessionId::parse(cookie.value()));

    let session = existing.unwrap_or_else(|| {
        let session = SessionId::new();
        tracing::trace!(session = %session, "Started session");
        session
    });
    req.extensions_mut().insert(session);

    let response = next.run(req).await;

    if existing.is_some() {
        return response;
    }

    let cookie = Cookie::build((SESSION_COOKIE, session.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), response).into_response()
}
