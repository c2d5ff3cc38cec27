//! JSON REST API for Rolodex.
//!
//! Exposes an axum [`Router`] backed by any [`rolodex_core::store::ContactStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rolodex_api::api_router(store.clone()))
//! ```

pub mod contacts;
pub mod error;
pub mod export;
pub mod extract;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, patch, post},
};
use rolodex_core::store::ContactStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ContactStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/contacts", get(contacts::list::<S>).post(contacts::create::<S>))
    .route("/contacts/bulk-delete", post(contacts::bulk_delete::<S>))
    .route(
      "/contacts/{id}",
      get(contacts::get_one::<S>)
        .put(contacts::update::<S>)
        .delete(contacts::delete_one::<S>),
    )
    .route("/contacts/{id}/favorite", patch(contacts::toggle_favorite::<S>))
    .route("/contacts-export", get(export::handler::<S>))
    .with_state(store)
}
