//! The `ContactStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `rolodex-store-sqlite`).
//! Higher layers (`rolodex-api`, `rolodex-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{
  contact::{Contact, ContactId, ContactPatch, NewContact},
  query::{ContactQuery, Page},
};

/// Abstraction over a Rolodex record store.
///
/// Lookups by id return `None` (or `false`) for unknown ids instead of an
/// error, so callers decide how "not found" is reported. Every method is
/// atomic with respect to concurrent reads.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Return one page of records matching `query`, plus the total match count.
  fn query<'a>(
    &'a self,
    query: &'a ContactQuery,
  ) -> impl Future<Output = Result<Page<Contact>, Self::Error>> + Send + 'a;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Every stored record in insertion order, ignoring any filter.
  fn all(&self) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new record. `id` and `created_at` are assigned by the store.
  fn create(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Contact, Self::Error>> + Send + '_;

  /// Apply a partial update and return the full record, or `None` if the id
  /// is unknown.
  fn update(
    &self,
    id: ContactId,
    patch: ContactPatch,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;

  /// Remove a record. Returns `false` if it did not exist.
  fn delete(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove every listed record in one transaction and return how many
  /// existed. Unknown ids are ignored.
  fn delete_many(
    &self,
    ids: Vec<ContactId>,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Flip `favorite` and return the updated record, or `None` if unknown.
  fn toggle_favorite(
    &self,
    id: ContactId,
  ) -> impl Future<Output = Result<Option<Contact>, Self::Error>> + Send + '_;
}
