//! Client-side list state and the operations that change it.
//!
//! The controller owns the active query and the last page the server
//! returned. Reads move the state through explicit [`Transition`]s; every
//! mutation is submitted and then followed by a fresh read of the current
//! query, so the visible list always equals some complete server response.

use std::{future::Future, path::Path};

use anyhow::Result;
use rolodex_core::{
  contact::{Contact, ContactDraft, ContactId},
  query::{ContactQuery, Page, PageMeta, SortSpec},
};

use crate::client::ApiClient;

/// Shown in place of the list whenever a read fails.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load contacts";

// ─── Backend seam ─────────────────────────────────────────────────────────────

/// The server operations the controller relies on.
pub trait ContactsBackend: Send + Sync {
  fn list(&self, query: &ContactQuery) -> impl Future<Output = Result<Page<Contact>>> + Send;

  fn create(&self, draft: ContactDraft) -> impl Future<Output = Result<Contact>> + Send;

  fn delete(&self, id: ContactId) -> impl Future<Output = Result<()>> + Send;

  fn toggle_favorite(&self, id: ContactId) -> impl Future<Output = Result<Contact>> + Send;

  fn export(&self) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

impl ContactsBackend for ApiClient {
  async fn list(&self, query: &ContactQuery) -> Result<Page<Contact>> {
    self.list_contacts(query).await
  }

  async fn create(&self, draft: ContactDraft) -> Result<Contact> {
    self.create_contact(&draft).await
  }

  async fn delete(&self, id: ContactId) -> Result<()> { self.delete_contact(id).await }

  async fn toggle_favorite(&self, id: ContactId) -> Result<Contact> {
    ApiClient::toggle_favorite(self, id).await
  }

  async fn export(&self) -> Result<Vec<u8>> { self.export_csv().await }
}

// ─── State ────────────────────────────────────────────────────────────────────

/// A state change of the list view.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
  LoadStarted,
  LoadSucceeded(Page<Contact>),
  LoadFailed(String),
}

/// What the list view shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListState {
  pub contacts: Vec<Contact>,
  pub meta:     PageMeta,
  pub loading:  bool,
  pub error:    Option<String>,
}

impl ListState {
  /// Apply one transition. A completed load replaces contacts and metadata
  /// together, so two responses are never mixed; a failed one resets both.
  pub fn apply(&mut self, transition: Transition) {
    match transition {
      Transition::LoadStarted => {
        self.loading = true;
        self.error = None;
      }
      Transition::LoadSucceeded(page) => {
        self.contacts = page.data;
        self.meta = page.meta;
        self.loading = false;
        self.error = None;
      }
      Transition::LoadFailed(message) => {
        self.contacts.clear();
        self.meta = PageMeta::default();
        self.loading = false;
        self.error = Some(message);
      }
    }
  }
}

/// Transient feedback after a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
  Info(String),
  Error(String),
}

// ─── Controller ───────────────────────────────────────────────────────────────

pub struct Controller<B> {
  backend: B,
  query:   ContactQuery,
  state:   ListState,
  notice:  Option<Notice>,
}

impl<B: ContactsBackend> Controller<B> {
  pub fn new(backend: B) -> Self {
    Self {
      backend,
      query: ContactQuery::default(),
      state: ListState::default(),
      notice: None,
    }
  }

  pub fn state(&self) -> &ListState { &self.state }

  pub fn query(&self) -> &ContactQuery { &self.query }

  pub fn notice(&self) -> Option<&Notice> { self.notice.as_ref() }

  pub fn clear_notice(&mut self) { self.notice = None; }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// First load with default query parameters.
  pub async fn activate(&mut self) {
    self.query = ContactQuery::default();
    self.reload().await;
  }

  /// Re-issue the current query.
  ///
  /// If the current page no longer exists (e.g. its last record was deleted)
  /// the last existing page is loaded instead.
  pub async fn reload(&mut self) {
    self.fetch().await;

    let meta = self.state.meta;
    if self.state.error.is_none()
      && self.state.contacts.is_empty()
      && self.query.page > meta.page_count()
      && meta.total > 0
    {
      self.query = self.query.clone().with_page(i64::from(meta.page_count()));
      self.fetch().await;
    }
  }

  async fn fetch(&mut self) {
    self.state.apply(Transition::LoadStarted);
    let transition = match self.backend.list(&self.query).await {
      Ok(page) => Transition::LoadSucceeded(page),
      Err(e) => {
        tracing::warn!(error = %e, "contact list read failed");
        Transition::LoadFailed(LOAD_FAILED_MESSAGE.to_owned())
      }
    };
    self.state.apply(transition);
  }

  pub async fn set_search(&mut self, search: &str) {
    self.query = self.query.clone().with_search(search);
    self.reload().await;
  }

  pub async fn set_sort(&mut self, sort: SortSpec) {
    self.query = self.query.clone().with_sort(sort);
    self.reload().await;
  }

  /// Advance one page if there is one. Returns whether a read was issued.
  pub async fn next_page(&mut self) -> bool {
    if self.query.page >= self.state.meta.page_count() {
      return false;
    }
    self.query = self.query.clone().with_page(i64::from(self.query.page) + 1);
    self.reload().await;
    true
  }

  /// Go back one page if not on the first. Returns whether a read was issued.
  pub async fn prev_page(&mut self) -> bool {
    if self.query.page <= 1 {
      return false;
    }
    self.query = self.query.clone().with_page(i64::from(self.query.page) - 1);
    self.reload().await;
    true
  }

  // ── Mutations ─────────────────────────────────────────────────────────────

  /// Submit a create, then refresh regardless of the outcome. Returns whether
  /// the create succeeded.
  pub async fn add_contact(&mut self, draft: ContactDraft) -> bool {
    let result = self.backend.create(draft).await;
    let ok = result.is_ok();
    self.notice = Some(match result {
      Ok(contact) => Notice::Info(format!("Added {}", contact.name)),
      Err(e) => {
        tracing::warn!(error = %e, "create failed");
        Notice::Error("Failed to add contact".to_owned())
      }
    });
    self.reload().await;
    ok
  }

  /// Submit a delete, then refresh.
  pub async fn delete_contact(&mut self, id: ContactId) -> bool {
    let result = self.backend.delete(id).await;
    let ok = result.is_ok();
    self.notice = Some(match result {
      Ok(()) => Notice::Info("Contact deleted".to_owned()),
      Err(e) => {
        tracing::warn!(error = %e, %id, "delete failed");
        Notice::Error("Failed to delete contact".to_owned())
      }
    });
    self.reload().await;
    ok
  }

  /// Flip the favorite flag, then refresh.
  pub async fn toggle_favorite(&mut self, id: ContactId) -> bool {
    let result = self.backend.toggle_favorite(id).await;
    let ok = result.is_ok();
    self.notice = Some(match result {
      Ok(c) if c.favorite => Notice::Info(format!("{} marked as favorite", c.name)),
      Ok(c) => Notice::Info(format!("{} unmarked", c.name)),
      Err(e) => {
        tracing::warn!(error = %e, %id, "favorite toggle failed");
        Notice::Error("Failed to update contact".to_owned())
      }
    });
    self.reload().await;
    ok
  }

  /// Download the full CSV export into `path`.
  pub async fn export_to(&mut self, path: &Path) -> bool {
    let result = match self.backend.export().await {
      Ok(bytes) => tokio::fs::write(path, bytes).await.map_err(anyhow::Error::from),
      Err(e) => Err(e),
    };
    let ok = result.is_ok();
    self.notice = Some(match result {
      Ok(()) => Notice::Info(format!("Exported to {}", path.display())),
      Err(e) => {
        tracing::warn!(error = %e, "export failed");
        Notice::Error("Export failed".to_owned())
      }
    });
    ok
  }
}

// ─── Test backend ─────────────────────────────────────────────────────────────
