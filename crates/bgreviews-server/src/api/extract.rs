//! `Path` and `Query` wrappers whose rejections render as [`ApiError`].

use axum::{
    extract::{FromRequestParts, Path, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use super::ApiError;

/// Path parameters; an undecodable segment is `InvalidDataType`.
#[derive(Debug, Clone)]
pub(super) struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(inner) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "path parameters rejected");
                ApiError::InvalidDataType
            })?;

        Ok(ApiPath(inner))
    }
}

/// Query string; a malformed or repeated key is `InvalidDataType`.
#[derive(Debug, Clone)]
pub(super) struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(inner) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "query string rejected");
                ApiError::InvalidDataType
            })?;

        Ok(ApiQuery(inner))
    }
}
