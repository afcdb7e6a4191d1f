//! HTTP API module for the hero routes, static pages and operational endpoints.

pub mod docs;
pub mod extract;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::{create_router, StaticPages};
