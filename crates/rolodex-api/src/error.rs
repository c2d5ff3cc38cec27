//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, QueryRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Message returned for unknown ids.
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// An error returned by an API handler.
///
/// Rendered as `{"error": "<message>"}`. Store failures are logged and
/// reported with a generic message only.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn not_found() -> Self { ApiError::NotFound(NOT_FOUND_MESSAGE.to_owned()) }

  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    ApiError::Store(Box::new(e))
  }
}

impl From<rolodex_core::Error> for ApiError {
  fn from(e: rolodex_core::Error) -> Self {
    match e {
      rolodex_core::Error::Validation(m) => ApiError::BadRequest(m),
      other => ApiError::store(other),
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl From<QueryRejection> for ApiError {
  fn from(rejection: QueryRejection) -> Self { ApiError::BadRequest(rejection.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => {
        tracing::warn!(message = %m, "resource not found");
        (StatusCode::NOT_FOUND, m.clone())
      }
      ApiError::BadRequest(m) => {
        tracing::warn!(message = %m, "rejected request");
        (StatusCode::BAD_REQUEST, m.clone())
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
