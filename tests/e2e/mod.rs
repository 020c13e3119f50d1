//! In-process HTTP harness.
//!
//! Builds the full application (method override, sessions, routes, static
//! files) over a chosen repository and drives it with `oneshot`, so no
//! socket or database is needed.

use axum::body::Body;
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use contact_book::domain::PhoneLocale;
use contact_book::repositories::{ContactRepository, InMemoryContactRepository};
use contact_book::services::ContactServiceImpl;
use contact_book::session::{FlashStore, SESSION_COOKIE};
use contact_book::{build_app, App, AppState, Employee, MetricsTracker};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;

pub mod fixtures;

/// A running application plus handles on its shared pieces.
#[allow(dead_code)]
pub struct TestApp {
    pub app: App,
    pub flash: FlashStore,
    pub metrics: MetricsTracker,
}

#[allow(dead_code)]
impl TestApp {
    /// Application backed by a fresh in-memory store.
    pub fn new() -> (Self, InMemoryContactRepository) {
        let repo = InMemoryContactRepository::new();
        (Self::with_repository(Arc::new(repo.clone())), repo)
    }

    /// Application backed by any repository.
    pub fn with_repository(repo: Arc<dyn ContactRepository>) -> Self {
        let metrics = MetricsTracker::new();
        let contacts = Arc::new(ContactServiceImpl::new(
            repo,
            PhoneLocale::IdId,
            metrics.clone(),
        ));
        let flash = FlashStore::new(60);
        let state = AppState::new(
            contacts,
            flash.clone(),
            Employee::default_roster(),
            metrics.clone(),
        );

        Self {
            app: build_app(state, Path::new("public")),
            flash,
            metrics,
        }
    }

    /// Send a request and collect the whole response.
    pub async fn request(&self, req: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::empty()).unwrap()).await
    }

    /// Submit an urlencoded form the way a browser would.
    pub async fn submit(
        &self,
        method: Method,
        uri: &str,
        fields: &[(&str, &str)],
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.request(builder.body(Body::from(encode_form(fields))).unwrap())
            .await
    }
}

/// A fully buffered response.
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    /// The `name=value` pair of the session cookie, ready to send back.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .find(|pair| pair.starts_with(&format!("{}=", SESSION_COOKIE)))
            .map(str::to_string)
    }

    pub fn assert_redirects_to(&self, target: &str) {
        assert_eq!(self.status, StatusCode::SEE_OTHER, "body: {}", self.body);
        assert_eq!(self.location(), Some(target));
    }
}

pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}
