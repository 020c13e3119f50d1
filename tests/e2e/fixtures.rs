//! Sample form submissions.
#![allow(dead_code)]

/// A submission that passes validation under the id-ID phone locale.
pub fn valid_contact(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_string()),
        ("email", format!("{}@example.com", name.to_lowercase())),
        ("phone", "081234567890".to_string()),
    ]
}

/// Borrow owned form fields in the shape `TestApp::submit` takes.
pub fn as_fields<'a>(fields: &'a [(&'static str, String)]) -> Vec<(&'a str, &'a str)> {
    fields.iter().map(|(k, v)| (*k, v.as_str())).collect()
}
