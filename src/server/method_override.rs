//! HTML forms can only send GET and POST. A POST carrying `_method=PUT`,
//! `_method=PATCH` or `_method=DELETE` in its query string is rewritten to
//! that method before routing.

use axum::extract::Request;
use axum::http::Method;

/// Query parameter naming the intended method.
pub const METHOD_PARAM: &str = "_method";

/// Rewrite an overridden POST in place. Other requests pass through.
pub fn override_method(mut req: Request) -> Request {
    if req.method() != Method::POST {
        return req;
    }

    if let Some(method) = req.uri().query().and_then(requested_method) {
        tracing::trace!(method = %method, path = %req.uri().path(), "Method override");
        *req.method_mut() = method;
    }
    req
}

fn requested_method(query: &str) -> Option<Method> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == METHOD_PARAM)
        .and_then(|(_, value)| urlencoding::decode(value).ok())
        .and_then(|value| match value.to_ascii_uppercase().as_str() {
            "PUT" => Some(Method::PUT),
            "PATCH" => Some(Method::PATCH),
            "DELETE" => Some(Method::DELETE),
            _ => None,
        })
}
