//! Request extractors that report failures through [`ApiError`].

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// Like [`axum::Json`], but a malformed body becomes a 400 with the usual
/// `{"error": ...}` envelope instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// [`axum::extract::Query`] with the same JSON error envelope, for query
/// strings that do not even deserialize (a repeated key, for one).
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
