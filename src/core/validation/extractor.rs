//! Axum extractors for validated payloads
//!
//! `ValidatedJson<T>` and `ValidatedQuery<T>` deserialize the request body or
//! query string and run `T::validate()` before the handler is called. Both
//! reject with a [`ServiceError`] so the error body has the same shape as
//! every other failure.

use crate::core::error::{ServiceError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Axum extractor for a validated JSON body
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_client(
///     ValidatedJson(request): ValidatedJson<UpsertClientRequest>,
/// ) -> Result<Json<ClientResponse>, ServiceError> {
///     // request.name is already 3 to 30 characters long
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| ValidationError::InvalidJson {
                message: e.body_text(),
            })?;

        payload.validate()?;
        Ok(ValidatedJson(payload))
    }
}

/// Axum extractor for a validated query string
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ValidationError::InvalidQuery {
                message: e.body_text(),
            })?;

        params.validate()?;
        Ok(ValidatedQuery(params))
    }
}
