//! Custom Axum extractors
//!
//! Each turns framework rejections into [`ApiError`] so every client error
//! shares one JSON shape.

use axum::extract::{FromRequest, FromRequestParts, Json, Query, Request};
use axum::http::request::Parts;
use serde_json::Value;

use super::error::ApiError;
use crate::db::Session;
use crate::models::{ListParams, ListWindow, ValidationError};
use crate::state::AppState;

/// Per-request session, acquired when the handler is entered.
///
/// Dropped with the handler future, so it is released on success, on error,
/// and when the request is cancelled.
impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(state.engine().session()?)
    }
}

/// JSON body validated into a wire record
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: TryFrom<Value, Error = ValidationError> + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        Ok(Self(T::try_from(value)?))
    }
}

/// `skip` / `limit` query parameters
pub struct ListQuery(pub ListWindow);

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ListParams>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })?;

        Ok(Self(ListWindow::try_from(params)?))
    }
}
