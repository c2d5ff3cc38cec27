//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed number of
//! fractional digits so that text order equals chronological order. Tags are
//! stored as compact JSON. Ids are stored as hyphenated lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use rolodex_core::{
  contact::{Contact, ContactId},
  query::{SortDirection, SortField},
};

use crate::{Error, Result};

// ─── ContactId ───────────────────────────────────────────────────────────────

pub fn encode_id(id: ContactId) -> String { id.to_string() }

pub fn decode_id(s: &str) -> Result<ContactId> { Ok(s.parse()?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Timestamp { value: s.to_owned(), reason: e.to_string() })
}

// ─── Tags ────────────────────────────────────────────────────────────────────

pub fn encode_tags(tags: &[String]) -> Result<String> {
  Ok(serde_json::to_string(tags)?)
}

pub fn decode_tags(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Sorting ─────────────────────────────────────────────────────────────────

/// Column backing a sort field. Only ever interpolated from this fixed set.
pub fn sort_column(field: SortField) -> &'static str {
  match field {
    SortField::Name => "name",
    SortField::Email => "email",
    SortField::Phone => "phone",
    SortField::CreatedAt => "created_at",
    SortField::Favorite => "favorite",
  }
}

pub fn sort_keyword(direction: SortDirection) -> &'static str {
  match direction {
    SortDirection::Asc => "ASC",
    SortDirection::Desc => "DESC",
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawContact::from_row`].
pub const CONTACT_COLUMNS: &str =
  "id, name, email, phone, message, tags, favorite, created_at";

/// Raw values read directly from a `contacts` row.
pub struct RawContact {
  pub id:         String,
  pub name:       String,
  pub email:      String,
  pub phone:      String,
  pub message:    String,
  pub tags:       String,
  pub favorite:   bool,
  pub created_at: String,
}

impl RawContact {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      phone:      row.get(3)?,
      message:    row.get(4)?,
      tags:       row.get(5)?,
      favorite:   row.get(6)?,
      created_at: row.get(7)?,
    })
  }

  pub fn into_contact(self) -> Result<Contact> {
    Ok(Contact {
      id:         decode_id(&self.id)?,
      name:       self.name,
      email:      self.email,
      phone:      self.phone,
      message:    self.message,
      tags:       decode_tags(&self.tags)?,
      favorite:   self.favorite,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn timestamps_sort_as_text() {
    let a = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let b = a + chrono::Duration::microseconds(1500);
    assert!(encode_dt(a) < encode_dt(b));
    assert_eq!(encode_dt(a).len(), encode_dt(b).len());
    assert_eq!(decode_dt(&encode_dt(b)).unwrap(), b);
  }
}
