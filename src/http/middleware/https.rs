//! HTTPS enforcement.
//!
//! TLS is terminated in front of the gateway, so a request counts as secure
//! when its URI scheme is `https` or a proxy set `x-forwarded-proto: https`.
//! Other requests are redirected to the same host and path over HTTPS.

use axum::{
    body::Body,
    http::{header, uri::Scheme, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

fn is_secure<B>(request: &Request<B>) -> bool {
    if request.uri().scheme() == Some(&Scheme::HTTPS) {
        return true;
    }
    request
        .headers()
        .get(X_FORWARDED_PROTO)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("https"))
}

/// Redirect target for an insecure request, if a host is known.
fn https_location<B>(request: &Request<B>) -> Option<String> {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().authority().map(|a| a.as_str()))?;
    let path = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    Some(format!("https://{host}{path}"))
}

pub async fn redirect_to_https(request: Request<Body>, next: Next) -> Response {
    if is_secure(&request) {
        return next.run(request).await;
    }
    match https_location(&request) {
        Some(location) => {
            tracing::debug!(location = %location, "Redirecting to HTTPS");
            (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
        }
        None => (StatusCode::BAD_REQUEST, "Missing Host header").into_response(),
    }
}
