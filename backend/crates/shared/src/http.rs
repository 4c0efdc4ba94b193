//! Request Dispatcher
//!
//! Every route handler goes through the same three pieces:
//! - [`JsonBody`] binds and validates the request body,
//! - [`PathId`] binds a typed id from the path,
//! - [`dispatch`] turns the handler's typed result into exactly one response.
//!
//! Client errors are written verbatim as `{ message, code? }`. Server errors
//! are logged in full and replaced by `"failed to <operation>"`.

use std::borrow::Cow;

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::app_error::AppError;
use crate::error::conversions::ErrorBody;
use crate::id::Id;

/// Field-level validation run after a body has been deserialized.
///
/// The default implementation accepts everything.
pub trait Validate {
    fn validate(&self) -> Result<(), Cow<'static, str>> {
        Ok(())
    }
}

// ============================================================================
// Body binding
// ============================================================================

/// JSON body extractor that also runs [`Validate::validate`].
///
/// The handler is never invoked when binding fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "request body rejected");
            AppError::bad_request("invalid request body").with_source(rejection)
        })?;

        value
            .validate()
            .map_err(|reason| AppError::bad_request(format!("invalid request body: {}", reason)))?;

        Ok(JsonBody(value))
    }
}

// ============================================================================
// Path binding
// ============================================================================

/// Typed id taken from the single path parameter of a route.
#[derive(Debug)]
pub struct PathId<M>(pub Id<M>);

impl<M, S> FromRequestParts<S> for PathId<M>
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request("invalid id parameter").with_source(rejection))?;

        raw.parse::<Id<M>>()
            .map(PathId)
            .map_err(|e| AppError::bad_request("invalid id parameter").with_source(e))
    }
}

// ============================================================================
// Response dispatch
// ============================================================================

/// A handler outcome waiting to be written as a response.
#[must_use]
pub struct Dispatch<T> {
    operation: &'static str,
    result: Result<T, AppError>,
}

/// Wrap a handler result for writing.
///
/// `operation` names the action in logs and in the generic server-error
/// message, e.g. `dispatch("create account", result)`.
pub fn dispatch<T, E>(operation: &'static str, result: Result<T, E>) -> Dispatch<T>
where
    E: Into<AppError>,
{
    Dispatch {
        operation,
        result: result.map_err(Into::into),
    }
}

impl<T: Serialize> IntoResponse for Dispatch<T> {
    fn into_response(self) -> Response {
        let operation = self.operation;
        match self.result {
            Ok(value) => (StatusCode::OK, Json(value)).into_response(),
            Err(err) if err.is_server_error() => {
                tracing::error!(
                    operation,
                    kind = %err.kind(),
                    message = %err.message(),
                    details = %err.details().unwrap_or_default(),
                    "request failed"
                );
                let status = StatusCode::from_u16(err.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                let message = format!("failed to {}", operation);
                let body = ErrorBody {
                    message: &message,
                    code: None,
                };
                (status, Json(body)).into_response()
            }
            Err(err) => {
                tracing::info!(
                    operation,
                    status = err.status_code(),
                    code = err.code().unwrap_or("-"),
                    message = %err.message(),
                    "request rejected"
                );
                err.into_response()
            }
        }
    }
}
