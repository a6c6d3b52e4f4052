//! All API endpoint setup

use axum::Router;
use axum::routing::delete;
use axum::routing::get;

pub use request::Form;
pub use request::PathParameters;
pub use request::parse_content;
pub use response::Error;
pub use response::Success;

use crate::storage::Storage;

mod request;
mod response;
mod todos;

/// Get the Axum router for all API routes
pub fn router<S: Storage>() -> Router {
    Router::new()
        .route("/todos", get(todos::list::<S>).post(todos::create::<S>))
        .route("/todos/{todo}", delete(todos::delete::<S>))
}
