//! Request body extraction for hero submissions.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    http::{header, StatusCode},
    Form, Json,
};
use serde::de::DeserializeOwned;

use super::handlers::ApiError;

/// Body extractor accepting either JSON or an url-encoded form.
///
/// The HTML form page posts url-encoded bodies while scripts send JSON,
/// so both must deserialize into the same request type.
#[derive(Debug, Clone)]
pub struct FormOrJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
            return Ok(Self(value));
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
            return Ok(Self(value));
        }

        Err(ApiError::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "expected an application/json or application/x-www-form-urlencoded body",
        ))
    }
}
