//! Everything that does not match a route ends up here

use axum::http::Method;
use axum::http::Uri;

use crate::api::Error;

/// Respond with a JSON `404 Not Found`
pub async fn fallback(method: Method, uri: Uri) -> Error {
    tracing::debug!("No route for {method} {uri}");

    Error::not_found("Not found")
}
