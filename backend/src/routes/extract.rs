//! Request body extraction with validation

use crate::error::ApiError;
use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;
use validator::Validate;

/// JSON body that has been deserialized and passed its `Validate` rules.
///
/// Malformed bodies become 400 `BAD_REQUEST`; rule violations become 400
/// `VALIDATION_ERROR` with per-field messages. Neither echoes the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            debug!(status = %rejection.status(), "Rejected request body");
            ApiError::BadRequest("Request body is not valid JSON for this endpoint".to_string())
        })?;

        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
