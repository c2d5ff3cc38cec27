//! Handlers for `/contacts` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/contacts` | `?search`, `?sort=<field>_<asc\|desc>`, `?page`, `?limit` |
//! | `GET`    | `/contacts/:id` | 404 if not found |
//! | `POST`   | `/contacts` | Body: [`ContactDraft`]; returns 201 + stored contact |
//! | `PUT`    | `/contacts/:id` | Body: [`ContactPatch`]; returns the updated contact |
//! | `DELETE` | `/contacts/:id` | `{"message":"Deleted"}` |
//! | `POST`   | `/contacts/bulk-delete` | Body: `{"ids":[...]}`; returns `{"deletedCount":n}` |
//! | `PATCH`  | `/contacts/:id/favorite` | Flips `favorite` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use rolodex_core::{
  contact::{Contact, ContactDraft, ContactId, ContactPatch},
  query::{ContactQuery, DEFAULT_LIMIT, Page, SortSpec},
  store::ContactStore,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
  error::ApiError,
  extract::{ApiJson, ApiQuery},
};

/// A path id that does not parse cannot name a stored record.
fn parse_id(raw: &str) -> Result<ContactId, ApiError> {
  raw.parse().map_err(|_| ApiError::not_found())
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// Query string of `GET /contacts`. Numbers arrive as text so that garbage
/// falls back to defaults instead of failing the request.
#[derive(Debug, Deserialize, Default)]
pub struct ListParams {
  pub search: Option<String>,
  pub sort:   Option<String>,
  pub page:   Option<String>,
  pub limit:  Option<String>,
}

impl ListParams {
  pub fn into_query(self) -> ContactQuery {
    fn int(raw: Option<String>, default: i64) -> i64 {
      raw
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
    }

    ContactQuery::new(
      self.search.unwrap_or_default(),
      self.sort.as_deref().map(SortSpec::parse).unwrap_or_default(),
      int(self.page, 1),
      int(self.limit, i64::from(DEFAULT_LIMIT)),
    )
  }
}

/// `GET /contacts[?search=...][&sort=...][&page=...][&limit=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<Page<Contact>>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = params.into_query();
  let page = store.query(&query).await.map_err(ApiError::store)?;
  Ok(Json(page))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = parse_id(&id)?;
  let contact = store
    .get(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(ApiError::not_found)?;
  Ok(Json(contact))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contacts`: returns 201 + the stored [`Contact`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ApiJson(draft): ApiJson<ContactDraft>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = draft.validate()?;
  let contact = store.create(input).await.map_err(ApiError::store)?;
  tracing::info!(id = %contact.id, "contact created");
  Ok((StatusCode::CREATED, Json(contact)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contacts/:id`: partial update; returns the full record.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
  ApiJson(patch): ApiJson<ContactPatch>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = parse_id(&id)?;
  let patch = patch.validate()?;
  let contact = store
    .update(id, patch)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(ApiError::not_found)?;
  Ok(Json(contact))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contacts/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Value>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = parse_id(&id)?;
  if !store.delete(id).await.map_err(ApiError::store)? {
    return Err(ApiError::not_found());
  }
  tracing::info!(%id, "contact deleted");
  Ok(Json(json!({ "message": "Deleted" })))
}

/// Body of `POST /contacts/bulk-delete`. `ids` is kept untyped so that a
/// missing or non-list value gets the same 400 as an empty list.
#[derive(Debug, Deserialize)]
pub struct BulkDeleteBody {
  #[serde(default)]
  pub ids: Value,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeleteResponse {
  pub deleted_count: u64,
}

/// `POST /contacts/bulk-delete`, body: `{"ids":["<id>", ...]}`.
///
/// Entries that are not well-formed ids are ignored along with unknown ones.
pub async fn bulk_delete<S>(
  State(store): State<Arc<S>>,
  ApiJson(body): ApiJson<BulkDeleteBody>,
) -> Result<Json<BulkDeleteResponse>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Some(raw_ids) = body.ids.as_array().filter(|ids| !ids.is_empty()) else {
    return Err(ApiError::BadRequest("No ids provided".to_owned()));
  };

  let ids: Vec<ContactId> = raw_ids
    .iter()
    .filter_map(Value::as_str)
    .filter_map(|s| s.parse().ok())
    .collect();

  let deleted_count = store.delete_many(ids).await.map_err(ApiError::store)?;
  tracing::info!(deleted_count, "bulk delete");
  Ok(Json(BulkDeleteResponse { deleted_count }))
}

// ─── Favorite ─────────────────────────────────────────────────────────────────

/// `PATCH /contacts/:id/favorite`
pub async fn toggle_favorite<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<String>,
) -> Result<Json<Contact>, ApiError>
where
  S: ContactStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let id = parse_id(&id)?;
  let contact = store
    .toggle_favorite(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(ApiError::not_found)?;
  Ok(Json(contact))
}
