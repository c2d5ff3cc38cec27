//! Handler for `GET /contacts-export`.

use std::sync::Arc;

use axum::{
  extract::State,
  http::header,
  response::IntoResponse,
};
use rolodex_core::{export::to_csv, store::ContactStore};

use crate::error::ApiError;

/// `GET /contacts-export`: every stored record as a CSV attachment,
/// regardless of any list query the caller has active.
pub async fn handler<S>(State(store): State<Arc<S>>) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let contacts = store.all().await.map_err(ApiError::store)?;
  let body = to_csv(&contacts)?;

  tracing::info!(rows = contacts.len(), "exported contacts");
  Ok((
    [
      (header::CONTENT_TYPE, "text/csv"),
      (header::CONTENT_DISPOSITION, "attachment; filename=contacts.csv"),
    ],
    body,
  ))
}
