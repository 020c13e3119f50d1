//! HTTP server for the contact book.
//!
//! Routes, shared state, request middleware and the serve loop. The router
//! is wrapped in a request-rewriting layer so that plain HTML forms can
//! reach the PUT and DELETE routes.

mod error;
pub mod handlers;
pub mod method_override;
pub mod views;

pub use error::{ServerError, ServerResult};
pub use method_override::override_method;

use crate::models::Employee;
use crate::observability::MetricsTracker;
use crate::services::ContactService;
use crate::session::{session_middleware, FlashStore};
use axum::extract::{FromRef, Request, State};
use axum::handler::HandlerWithoutStateExt;
use axum::middleware::{from_fn, from_fn_with_state, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::util::{MapRequest, MapRequestLayer};
use tower::Layer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// The complete application: router plus method override.
pub type App = MapRequest<Router, fn(Request) -> Request>;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub contacts: Arc<dyn ContactService>,
    pub flash: FlashStore,
    pub staff: Arc<Vec<Employee>>,
    pub metrics: MetricsTracker,
}

impl AppState {
    pub fn new(
        contacts: Arc<dyn ContactService>,
        flash: FlashStore,
        staff: Vec<Employee>,
        metrics: MetricsTracker,
    ) -> Self {
        Self {
            contacts,
            flash,
            staff: Arc::new(staff),
            metrics,
        }
    }
}

impl FromRef<AppState> for FlashStore {
    fn from_ref(state: &AppState) -> Self {
        state.flash.clone()
    }
}

/// Count every response by status.
async fn track_requests(State(metrics): State<MetricsTracker>, req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(req).await;

    metrics.track_http_request(
        &method,
        &path,
        response.status().as_u16(),
        started.elapsed().as_millis(),
    );
    response
}

/// Build the router. Paths no route claims are looked up in `static_dir`.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let static_files =
        ServeDir::new(static_dir).not_found_service(handlers::not_found.into_service());

    Router::new()
        .route("/", get(handlers::home))
        .route("/about", get(handlers::about))
        .route(
            "/contact",
            get(handlers::list_contacts)
                .post(handlers::create_contact)
                .put(handlers::update_contact)
                .patch(handlers::update_contact)
                .delete(handlers::delete_contact),
        )
        .route("/contact/add", get(handlers::add_contact_form))
        .route("/contact/edit/{id}", get(handlers::edit_contact_form))
        .route("/contact/{id}", get(handlers::contact_detail))
        .fallback_service(static_files)
        .layer(from_fn(session_middleware))
        .layer(from_fn_with_state(state.metrics.clone(), track_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the router and put the method override in front of it.
pub fn build_app(state: AppState, static_dir: &Path) -> App {
    let rewrite: fn(Request) -> Request = override_method;
    MapRequestLayer::new(rewrite).layer(build_router(state, static_dir))
}

/// Drop expired flash sessions every `every`.
pub fn spawn_session_sweeper(flash: FlashStore, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let purged = flash.purge_expired();
            if purged > 0 {
                tracing::debug!(purged = purged, "Expired sessions purged");
            }
        }
    })
}

/// Serve `app` until Ctrl-C or SIGTERM, then log the metrics summary.
pub async fn run_server(
    listener: TcpListener,
    app: App,
    metrics: MetricsTracker,
) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Listening on http://{}", addr);
    }

    axum::serve(listener, axum::ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("{}", metrics.summary());
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cannot listen for SIGTERM");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Shutdown signal received");
}
