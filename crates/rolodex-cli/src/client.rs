//! Async HTTP client wrapping the Rolodex JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use rolodex_core::{
  contact::{Contact, ContactDraft, ContactId},
  query::{ContactQuery, Page},
};
use serde::Deserialize;

/// Connection settings for the Rolodex API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  /// Applied to every request; a timed-out read counts as a failed read.
  pub timeout:  Duration,
}

/// Async HTTP client for the Rolodex JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// The server's `{"error": ...}` envelope.
#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// Pass 2xx responses through; turn anything else into an error carrying
  /// the server's message when it sent one.
  async fn check(resp: Response, what: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = resp
      .json::<ErrorBody>()
      .await
      .map(|b| b.error)
      .unwrap_or_default();
    Err(anyhow!("{what} → {status} {message}"))
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  /// `GET /api/contacts?search=&sort=&page=&limit=`
  pub async fn list_contacts(&self, query: &ContactQuery) -> Result<Page<Contact>> {
    let resp = self
      .client
      .get(self.url("/contacts"))
      .query(&[
        ("search", query.search.clone()),
        ("sort", query.sort.to_string()),
        ("page", query.page.to_string()),
        ("limit", query.limit.to_string()),
      ])
      .send()
      .await
      .context("GET /contacts failed")?;

    Self::check(resp, "GET /contacts")
      .await?
      .json()
      .await
      .context("deserialising contacts")
  }

  /// `GET /api/contacts-export`, raw CSV bytes.
  pub async fn export_csv(&self) -> Result<Vec<u8>> {
    let resp = self
      .client
      .get(self.url("/contacts-export"))
      .send()
      .await
      .context("GET /contacts-export failed")?;

    let bytes = Self::check(resp, "GET /contacts-export")
      .await?
      .bytes()
      .await
      .context("reading export body")?;
    Ok(bytes.to_vec())
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  /// `POST /api/contacts`
  pub async fn create_contact(&self, draft: &ContactDraft) -> Result<Contact> {
    let resp = self
      .client
      .post(self.url("/contacts"))
      .json(draft)
      .send()
      .await
      .context("POST /contacts failed")?;

    Self::check(resp, "POST /contacts")
      .await?
      .json()
      .await
      .context("deserialising created contact")
  }

  /// `DELETE /api/contacts/:id`
  pub async fn delete_contact(&self, id: ContactId) -> Result<()> {
    let resp = self
      .client
      .delete(self.url(&format!("/contacts/{id}")))
      .send()
      .await
      .context("DELETE /contacts/:id failed")?;

    Self::check(resp, "DELETE /contacts/:id").await?;
    Ok(())
  }

  /// `PATCH /api/contacts/:id/favorite`
  pub async fn toggle_favorite(&self, id: ContactId) -> Result<Contact> {
    let resp = self
      .client
      .patch(self.url(&format!("/contacts/{id}/favorite")))
      .send()
      .await
      .context("PATCH /contacts/:id/favorite failed")?;

    Self::check(resp, "PATCH /contacts/:id/favorite")
      .await?
      .json()
      .await
      .context("deserialising contact")
  }
}
