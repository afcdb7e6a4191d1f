//! HTTP API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

use crate::error::StoreError;
use crate::metrics::{self, LatencyTimer};
use crate::store::{
    delete_record, rename_record, upsert_power, Hero, HeroStore, StoreOp, UpsertOutcome,
};

use super::extract::FormOrJson;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Hero document.
    pub store: Arc<HeroStore>,
    /// Prometheus handle, if a recorder was installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state over the given store.
    pub fn new(store: HeroStore) -> Self {
        Self {
            store: Arc::new(store),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// JSON error body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human readable reason.
    pub error: String,
}

/// Error returned as a JSON `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Create an error with the given status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// 400 Bad Request.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Status this error maps to.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Body of `POST /submit-form`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitHeroRequest {
    /// Hero name.
    pub super_hero_name: Option<String>,
    /// Universe.
    pub universe: Option<String>,
    /// Power to append.
    pub super_powers: Option<String>,
}

/// Body of `PUT /update-hero/{name}/{universe}`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RenameHeroRequest {
    /// New hero name.
    pub new_super_hero_name: Option<String>,
    /// New universe.
    pub new_universe: Option<String>,
}

/// Response of `PUT /update-hero/{name}/{universe}`.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHeroResponse {
    /// Confirmation or failure message.
    pub super_powers: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Require a present, non-blank field.
fn required<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str, ApiError> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::bad_request(format!("{field} is required"))),
    }
}

/// List every stored hero.
#[utoipa::path(
    get,
    path = "/heroes",
    tag = "heroes",
    responses(
        (status = 200, description = "Every stored hero", body = [Hero]),
        (status = 500, description = "Hero document unreadable", body = ErrorBody)
    )
)]
pub async fn list_heroes(State(state): State<AppState>) -> Response {
    let _timer = LatencyTimer::new("list_heroes");

    match state.store.snapshot().await {
        Ok(heroes) => (StatusCode::OK, Json(heroes)).into_response(),
        Err(e) => {
            error!(error = %e, "Problem getting heroes");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Problem reading heroes")
                .into_response()
        }
    }
}

/// Append a power to a hero, creating the hero if needed.
#[utoipa::path(
    post,
    path = "/submit-form",
    tag = "heroes",
    request_body = SubmitHeroRequest,
    responses(
        (status = 302, description = "Stored; redirect back to the form"),
        (status = 400, description = "Missing or malformed field", body = ErrorBody),
        (status = 415, description = "Unsupported body type", body = ErrorBody),
        (status = 500, description = "Hero document unreadable or unwritable", body = String, content_type = "text/plain")
    )
)]
pub async fn submit_form(
    State(state): State<AppState>,
    FormOrJson(body): FormOrJson<SubmitHeroRequest>,
) -> Result<Response, ApiError> {
    let _timer = LatencyTimer::new("submit_form");

    let name = required("superHeroName", &body.super_hero_name)?;
    let universe = required("universe", &body.universe)?;
    let power = required("superPowers", &body.super_powers)?;

    let result = state
        .store
        .mutate(StoreOp::Upsert, |heroes| {
            Ok(upsert_power(heroes, name, universe, power))
        })
        .await;

    let response = match result {
        Ok(outcome) => {
            if outcome == UpsertOutcome::Created {
                metrics::inc_heroes_created();
            }
            info!(name, universe, power, ?outcome, "Hero power submitted");
            (StatusCode::FOUND, [(header::LOCATION, "/form")]).into_response()
        }
        Err(e) => {
            error!(error = %e, "Error processing form");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while processing your submission.",
            )
                .into_response()
        }
    };

    Ok(response)
}

/// Move a hero to a new name and universe, keeping its powers.
#[utoipa::path(
    put,
    path = "/update-hero/{currentSuperHeroName}/{currentUniverse}",
    tag = "heroes",
    params(
        ("currentSuperHeroName" = String, Path, description = "Current hero name"),
        ("currentUniverse" = String, Path, description = "Current universe")
    ),
    request_body = RenameHeroRequest,
    responses(
        (status = 200, description = "Hero renamed", body = UpdateHeroResponse),
        (status = 400, description = "Missing or malformed field", body = ErrorBody),
        (status = 404, description = "No hero under the current key", body = UpdateHeroResponse),
        (status = 409, description = "Another hero holds the new key", body = ErrorBody),
        (status = 500, description = "Hero document unreadable or unwritable", body = String, content_type = "text/plain")
    )
)]
pub async fn update_hero(
    State(state): State<AppState>,
    Path((current_name, current_universe)): Path<(String, String)>,
    FormOrJson(body): FormOrJson<RenameHeroRequest>,
) -> Result<Response, ApiError> {
    let _timer = LatencyTimer::new("update_hero");

    let new_name = required("newSuperHeroName", &body.new_super_hero_name)?;
    let new_universe = required("newUniverse", &body.new_universe)?;
    debug!(%current_name, %current_universe, new_name, new_universe, "Updating hero");

    let result = state
        .store
        .mutate(StoreOp::Rename, |heroes| {
            rename_record(heroes, &current_name, &current_universe, new_name, new_universe)
                .cloned()
        })
        .await;

    let response = match result {
        Ok(hero) => {
            info!(from = %current_name, to = %hero.super_hero_name, universe = %hero.universe, "Hero renamed");
            (
                StatusCode::OK,
                Json(UpdateHeroResponse {
                    super_powers: format!("You sent {new_name} and {new_universe}"),
                }),
            )
                .into_response()
        }
        Err(StoreError::NotFound { .. }) => {
            warn!(%current_name, %current_universe, "Superhero not found");
            (
                StatusCode::NOT_FOUND,
                Json(UpdateHeroResponse {
                    super_powers: "Superhero not found".to_string(),
                }),
            )
                .into_response()
        }
        Err(e @ StoreError::DuplicateKey { .. }) => {
            warn!(error = %e, "Rename rejected");
            ApiError::new(StatusCode::CONFLICT, e.to_string()).into_response()
        }
        Err(e) => {
            error!(error = %e, "Error updating hero");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred while updating the hero.",
            )
                .into_response()
        }
    };

    Ok(response)
}

/// Remove a hero.
#[utoipa::path(
    delete,
    path = "/hero/{superHeroName}/{universe}",
    tag = "heroes",
    params(
        ("superHeroName" = String, Path, description = "Hero name"),
        ("universe" = String, Path, description = "Universe")
    ),
    responses(
        (status = 200, description = "Hero removed", body = String, content_type = "text/plain"),
        (status = 404, description = "No such hero", body = String, content_type = "text/plain"),
        (status = 500, description = "Hero document unreadable or unwritable", body = String, content_type = "text/plain")
    )
)]
pub async fn delete_hero(
    State(state): State<AppState>,
    Path((name, universe)): Path<(String, String)>,
) -> Response {
    let _timer = LatencyTimer::new("delete_hero");

    let result = state
        .store
        .mutate(StoreOp::Delete, |heroes| {
            if delete_record(heroes, &name, &universe) {
                Ok(())
            } else {
                Err(StoreError::NotFound {
                    name: name.clone(),
                    universe: universe.clone(),
                })
            }
        })
        .await;

    match result {
        Ok(()) => {
            info!(%name, %universe, "Hero deleted");
            (StatusCode::OK, "successfully deleted hero").into_response()
        }
        Err(StoreError::NotFound { .. }) => {
            warn!(%name, %universe, "Hero not found");
            (StatusCode::NOT_FOUND, "Hero not found").into_response()
        }
        Err(e) => {
            error!(error = %e, "Error deleting hero");
            (StatusCode::INTERNAL_SERVER_ERROR, "There was a problem").into_response()
        }
    }
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Prometheus exposition, 503 when no recorder is installed.
pub async fn prometheus_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()).into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "metrics recorder not installed").into_response(),
    }
}
