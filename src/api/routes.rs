//! HTTP API route definitions.

use std::path::PathBuf;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::Config;

use super::docs::openapi;
use super::handlers::{
    delete_hero, health, list_heroes, prometheus_metrics, submit_form, update_hero, AppState,
};

/// Locations of the static pages served next to the API.
#[derive(Debug, Clone)]
pub struct StaticPages {
    /// Landing page served at `/`.
    pub landing_page: PathBuf,
    /// Form page served at `/form`.
    pub form_page: PathBuf,
    /// Directory for every other static asset.
    pub client_dir: PathBuf,
}

impl StaticPages {
    /// Resolve page locations from the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            landing_page: config.landing_page(),
            form_page: config.form_page(),
            client_dir: config.client_dir.clone(),
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState, pages: &StaticPages) -> Router {
    Router::new()
        // Static pages
        .route_service("/", ServeFile::new(&pages.landing_page))
        .route_service("/form", ServeFile::new(&pages.form_page))
        // Hero endpoints
        .route("/heroes", get(list_heroes))
        .route("/submit-form", post(submit_form))
        .route(
            "/update-hero/:current_super_hero_name/:current_universe",
            put(update_hero),
        )
        .route("/hero/:super_hero_name/:universe", delete(delete_hero))
        // Operational endpoints
        .route("/health", get(health))
        .route("/metrics", get(prometheus_metrics))
        .route("/api-docs/openapi.json", get(openapi))
        .fallback_service(ServeDir::new(&pages.client_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
