//! Superhero registry.
//!
//! A small CRUD service over "hero" records kept in a single JSON document
//! on disk. Each hero is identified by its name and universe and carries an
//! append-only list of powers.
//!
//! ```text
//! POST   /submit-form                   append a power (creates the hero)
//! GET    /heroes                        list every hero
//! PUT    /update-hero/:name/:universe   move a hero to a new key
//! DELETE /hero/:name/:universe          remove a hero
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`store`]: Hero records and the JSON document
//! - [`api`]: HTTP routes, handlers and OpenAPI document
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result, StoreError};
