//! OpenAPI document for the hero routes.

use axum::Json;
use utoipa::OpenApi;

use crate::store::Hero;

use super::handlers::{ErrorBody, RenameHeroRequest, SubmitHeroRequest, UpdateHeroResponse};

/// OpenAPI description of the hero routes.
#[derive(OpenApi)]
#[openapi(
    info(title = "Superhero Registry", description = "CRUD over a JSON document of heroes"),
    paths(
        crate::api::handlers::list_heroes,
        crate::api::handlers::submit_form,
        crate::api::handlers::update_hero,
        crate::api::handlers::delete_hero
    ),
    components(schemas(Hero, SubmitHeroRequest, RenameHeroRequest, UpdateHeroResponse, ErrorBody)),
    tags((name = "heroes", description = "Hero records"))
)]
pub struct ApiDoc;

/// Serve the OpenAPI document as JSON.
pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
