//! HTTP-level tests for every route.
//!
//! The full application runs in process over the in-memory store; requests
//! go through method override, sessions and static file fallback exactly as
//! they would behind a socket.

use axum::http::{Method, StatusCode};
use contact_book::repositories::ContactRepository;
use std::sync::Arc;

mod e2e;
mod mocks;

use e2e::{fixtures::*, TestApp};
use mocks::MockContactRepository;

#[tokio::test]
async fn test_home_lists_staff() {
    let (app, _repo) = TestApp::new();

    let res = app.get("/", None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Martinus Tri Nur Cahyono"));
    assert!(res.body.contains("Mobile Developer"));
}

#[tokio::test]
async fn test_about_page() {
    let (app, _repo) = TestApp::new();

    let res = app.get("/about", None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("<title>About</title>"));
}

#[tokio::test]
async fn test_first_visit_sets_session_cookie() {
    let (app, _repo) = TestApp::new();

    let res = app.get("/contact", None).await;
    let cookie = res.session_cookie().expect("session cookie should be set");

    // A known session is not re-issued
    let res = app.get("/contact", Some(&cookie)).await;
    assert!(res.session_cookie().is_none());
}

#[tokio::test]
async fn test_create_contact_redirects_and_flashes_once() {
    let (app, repo) = TestApp::new();
    let cookie = app.get("/contact", None).await.session_cookie().unwrap();

    let form = valid_contact("Alice");
    let res = app
        .submit(Method::POST, "/contact", &as_fields(&form), Some(&cookie))
        .await;

    res.assert_redirects_to("/contact");
    assert_eq!(repo.len(), 1);

    let list = app.get("/contact", Some(&cookie)).await;
    assert!(list.body.contains("Contact successfully added!"));
    assert!(list.body.contains("Alice"));

    let again = app.get("/contact", Some(&cookie)).await;
    assert!(!again.body.contains("Contact successfully added!"));
}

#[tokio::test]
async fn test_flash_is_private_to_its_session() {
    let (app, _repo) = TestApp::new();
    let mine = app.get("/contact", None).await.session_cookie().unwrap();
    let theirs = app.get("/contact", None).await.session_cookie().unwrap();

    let form = valid_contact("Alice");
    app.submit(Method::POST, "/contact", &as_fields(&form), Some(&mine))
        .await;

    let other = app.get("/contact", Some(&theirs)).await;
    assert!(!other.body.contains("Contact successfully added!"));
}

#[tokio::test]
async fn test_create_duplicate_name_rerenders_form() {
    let (app, repo) = TestApp::new();
    let form = valid_contact("Alice");
    app.submit(Method::POST, "/contact", &as_fields(&form), None)
        .await;

    let res = app
        .submit(Method::POST, "/contact", &as_fields(&form), None)
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Name Already Exist!"));
    assert!(res.body.contains("<title>Add Contact</title>"));
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_create_invalid_fields_keeps_submitted_values() {
    let (app, repo) = TestApp::new();

    let res = app
        .submit(
            Method::POST,
            "/contact",
            &[("name", "Bob"), ("email", "not-an-email"), ("phone", "12345")],
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Invalid Email!"));
    assert!(res.body.contains("Invalid Phone Number!"));
    assert!(res.body.contains(r#"value="not-an-email""#));
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_create_with_missing_fields_is_a_validation_error() {
    let (app, repo) = TestApp::new();

    let res = app
        .submit(Method::POST, "/contact", &[("name", "Bob")], None)
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Invalid Email!"));
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_edit_form_for_missing_contact_is_404() {
    let (app, _repo) = TestApp::new();

    let res = app.get("/contact/edit/does-not-exist", None).await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, "<h1>404</h1>");
}

#[tokio::test]
async fn test_edit_form_prefills_contact() {
    let (app, repo) = TestApp::new();
    let form = valid_contact("Alice");
    app.submit(Method::POST, "/contact", &as_fields(&form), None)
        .await;
    let alice = repo.list_all().await.unwrap().remove(0);

    let res = app.get(&format!("/contact/edit/{}", alice.id), None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains(&format!(r#"name="_id" value="{}""#, alice.id)));
    assert!(res.body.contains(r#"name="oldName" value="Alice""#));
}

#[tokio::test]
async fn test_update_via_method_override() {
    let (app, repo) = TestApp::new();
    let cookie = app.get("/contact", None).await.session_cookie().unwrap();
    let form = valid_contact("Alice");
    app.submit(Method::POST, "/contact", &as_fields(&form), Some(&cookie))
        .await;
    let alice = repo.list_all().await.unwrap().remove(0);
    let id = alice.id.to_string();

    let res = app
        .submit(
            Method::POST,
            "/contact?_method=PUT",
            &[
                ("_id", id.as_str()),
                ("oldName", "Alice"),
                ("name", "Alice"),
                ("email", "alice@new.example.com"),
                ("phone", "081234567890"),
            ],
            Some(&cookie),
        )
        .await;

    res.assert_redirects_to("/contact");
    let stored = repo.find_by_id(&alice.id).await.unwrap().unwrap();
    assert_eq!(stored.email, "alice@new.example.com");

    let list = app.get("/contact", Some(&cookie)).await;
    assert!(list.body.contains("Contact successfully updated!"));
}

#[tokio::test]
async fn test_update_to_taken_name_rerenders_edit_form() {
    let (app, repo) = TestApp::new();
    for name in ["Alice", "Bob"] {
        let form = valid_contact(name);
        app.submit(Method::POST, "/contact", &as_fields(&form), None)
            .await;
    }
    let bob = repo.find_by_name("Bob").await.unwrap().unwrap();
    let id = bob.id.to_string();

    let res = app
        .submit(
            Method::PUT,
            "/contact",
            &[
                ("_id", id.as_str()),
                ("oldName", "Bob"),
                ("name", "Alice"),
                ("email", "bob@example.com"),
                ("phone", "081234567890"),
            ],
            None,
        )
        .await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Name Already Exist!"));
    assert!(res.body.contains(&format!(r#"name="_id" value="{}""#, id)));
    assert_eq!(repo.find_by_id(&bob.id).await.unwrap().unwrap().name, "Bob");
}

#[tokio::test]
async fn test_delete_via_method_override() {
    let (app, repo) = TestApp::new();
    let cookie = app.get("/contact", None).await.session_cookie().unwrap();
    let form = valid_contact("Alice");
    app.submit(Method::POST, "/contact", &as_fields(&form), Some(&cookie))
        .await;
    let id = repo.list_all().await.unwrap().remove(0).id.to_string();

    let res = app
        .submit(
            Method::POST,
            "/contact?_method=DELETE",
            &[("_id", id.as_str())],
            Some(&cookie),
        )
        .await;

    res.assert_redirects_to("/contact");
    assert!(repo.is_empty());

    let list = app.get("/contact", Some(&cookie)).await;
    assert!(list.body.contains("Contact successfully deleted!"));
}

#[tokio::test]
async fn test_delete_missing_contact_still_redirects() {
    let (app, _repo) = TestApp::new();

    let res = app
        .submit(Method::DELETE, "/contact", &[("_id", "does-not-exist")], None)
        .await;

    res.assert_redirects_to("/contact");
}

#[tokio::test]
async fn test_detail_page() {
    let (app, repo) = TestApp::new();
    let form = valid_contact("Alice");
    app.submit(Method::POST, "/contact", &as_fields(&form), None)
        .await;
    let alice = repo.list_all().await.unwrap().remove(0);

    let res = app.get(&format!("/contact/{}", alice.id), None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("alice@example.com"));
    assert!(res.body.contains("081234567890"));
}

#[tokio::test]
async fn test_detail_of_missing_contact_renders_notice() {
    let (app, _repo) = TestApp::new();

    let res = app.get("/contact/does-not-exist", None).await;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("Contact not found."));
}

#[tokio::test]
async fn test_static_assets_and_unknown_paths() {
    let (app, _repo) = TestApp::new();

    let css = app.get("/css/style.css", None).await;
    assert_eq!(css.status, StatusCode::OK);

    let missing = app.get("/no/such/page", None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body, "<h1>404</h1>");
}

#[tokio::test]
async fn test_store_failure_is_500() {
    let repo = MockContactRepository::new();
    repo.fail_all();
    let app = TestApp::with_repository(Arc::new(repo.clone()));

    let res = app.get("/contact", None).await;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(repo.get_call_count("list_all"), 1);
    assert_eq!(app.metrics.http_errors_total(), 1);
}

#[tokio::test]
async fn test_requests_are_counted() {
    let (app, _repo) = TestApp::new();

    app.get("/", None).await;
    app.get("/contact/edit/missing", None).await;

    assert_eq!(app.metrics.http_requests_total(), 2);
    assert_eq!(app.metrics.http_errors_total(), 0);
}
