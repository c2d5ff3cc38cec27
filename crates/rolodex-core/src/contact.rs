//! The contact record and the typed inputs that create and modify it.
//!
//! Input types are split by lifecycle stage: a [`ContactDraft`] is whatever
//! the caller sent, a [`NewContact`] is a draft that passed presence checks,
//! and a [`ContactPatch`] carries a partial update.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Message returned when a create request lacks a required field.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Name, email and phone are required";

// ─── Identity ────────────────────────────────────────────────────────────────

/// Server-generated, immutable contact identifier.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
  pub fn new() -> Self { Self(Uuid::new_v4()) }
}

impl Default for ContactId {
  fn default() -> Self { Self::new() }
}

impl From<Uuid> for ContactId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl fmt::Display for ContactId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.hyphenated().fmt(f)
  }
}

impl FromStr for ContactId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s.trim()).map(Self)
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A stored contact.
///
/// `name`, `email` and `phone` are never empty on a stored record;
/// `id` and `created_at` never change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:         ContactId,
  pub name:       String,
  pub email:      String,
  pub phone:      String,
  #[serde(default)]
  pub message:    String,
  #[serde(default)]
  pub tags:       Vec<String>,
  #[serde(default)]
  pub favorite:   bool,
  pub created_at: DateTime<Utc>,
}

impl Contact {
  /// Assemble a record from validated input with a fresh id and timestamp.
  pub fn from_new(input: NewContact) -> Self {
    Self {
      id:         ContactId::new(),
      name:       input.name,
      email:      input.email,
      phone:      input.phone,
      message:    input.message,
      tags:       input.tags,
      favorite:   false,
      created_at: Utc::now(),
    }
  }
}

// ─── Create input ────────────────────────────────────────────────────────────

/// Body of a create request.
///
/// The required fields are optional here so that an absent field is reported
/// as a validation failure rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tags:    Option<Vec<String>>,
}

impl ContactDraft {
  /// Check presence of the required fields and normalise the rest.
  pub fn validate(self) -> Result<NewContact> {
    let (Some(name), Some(email), Some(phone)) = (
      required(self.name),
      required(self.email),
      required(self.phone),
    ) else {
      return Err(Error::Validation(REQUIRED_FIELDS_MESSAGE.to_owned()));
    };

    Ok(NewContact {
      name,
      email,
      phone,
      message: self.message.unwrap_or_default(),
      tags: normalize_tags(self.tags.unwrap_or_default()),
    })
  }
}

/// A create request that passed validation. The only input the store accepts
/// for new records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
  pub name:    String,
  pub email:   String,
  pub phone:   String,
  pub message: String,
  pub tags:    Vec<String>,
}

impl NewContact {
  /// Shorthand for building validated input in code and tests.
  pub fn new(
    name: impl Into<String>,
    email: impl Into<String>,
    phone: impl Into<String>,
  ) -> Result<Self> {
    ContactDraft {
      name: Some(name.into()),
      email: Some(email.into()),
      phone: Some(phone.into()),
      ..ContactDraft::default()
    }
    .validate()
  }

  pub fn with_message(mut self, message: impl Into<String>) -> Self {
    self.message = message.into();
    self
  }

  pub fn with_tags<I, T>(mut self, tags: I) -> Self
  where
    I: IntoIterator<Item = T>,
    T: Into<String>,
  {
    self.tags = normalize_tags(tags.into_iter().map(Into::into).collect());
    self
  }
}

// ─── Update input ────────────────────────────────────────────────────────────

/// Body of an update request. Every mutable field is optional; unknown keys
/// (including `id` and `createdAt`) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPatch {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name:     Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message:  Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub tags:     Option<Vec<String>>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub favorite: Option<bool>,
}

impl ContactPatch {
  /// Re-check the fields being updated: a supplied required field may not be
  /// blank.
  pub fn validate(self) -> Result<Self> {
    for (field, value) in [
      ("name", &self.name),
      ("email", &self.email),
      ("phone", &self.phone),
    ] {
      if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
        return Err(Error::Validation(format!("{field} cannot be empty")));
      }
    }

    Ok(Self {
      name: self.name.map(|v| v.trim().to_owned()),
      email: self.email.map(|v| v.trim().to_owned()),
      phone: self.phone.map(|v| v.trim().to_owned()),
      tags: self.tags.map(normalize_tags),
      ..self
    })
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn required(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
  tags
    .into_iter()
    .map(|t| t.trim().to_owned())
    .filter(|t| !t.is_empty())
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn draft_without_phone_is_rejected() {
    let draft = ContactDraft {
      name: Some("Ann Lee".into()),
      email: Some("ann@x.com".into()),
      ..ContactDraft::default()
    };
    match draft.validate() {
      Err(Error::Validation(msg)) => assert_eq!(msg, REQUIRED_FIELDS_MESSAGE),
      other => panic!("expected validation error, got {other:?}"),
    }
  }

  #[test]
  fn blank_name_counts_as_missing() {
    assert!(NewContact::new("   ", "ann@x.com", "5551234567").is_err());
  }

  #[test]
  fn draft_defaults_optional_fields() {
    let new = NewContact::new(" Ann Lee ", "ann@x.com", "5551234567").unwrap();
    assert_eq!(new.name, "Ann Lee");
    assert_eq!(new.message, "");
    assert!(new.tags.is_empty());
  }

  #[test]
  fn draft_deserializes_from_partial_json() {
    let draft: ContactDraft =
      serde_json::from_str(r#"{"name":"Ann","tags":["a"," ","b "]}"#).unwrap();
    assert_eq!(draft.name.as_deref(), Some("Ann"));
    assert!(draft.email.is_none());

    let new = ContactDraft {
      email: Some("ann@x.com".into()),
      phone: Some("5551234567".into()),
      ..draft
    }
    .validate()
    .unwrap();
    assert_eq!(new.tags, vec!["a".to_string(), "b".to_string()]);
  }

  #[test]
  fn patch_rejects_blank_required_field() {
    let patch = ContactPatch { email: Some("".into()), ..ContactPatch::default() };
    assert!(matches!(patch.validate(), Err(Error::Validation(_))));
  }

  #[test]
  fn patch_ignores_immutable_keys() {
    let patch: ContactPatch = serde_json::from_str(
      r#"{"id":"nope","createdAt":"2020-01-01T00:00:00Z","message":"hi"}"#,
    )
    .unwrap();
    assert_eq!(patch.message.as_deref(), Some("hi"));
    assert!(patch.name.is_none());
  }

  #[test]
  fn contact_serializes_camel_case() {
    let contact =
      Contact::from_new(NewContact::new("Ann", "ann@x.com", "5551234567").unwrap());
    let json = serde_json::to_value(&contact).unwrap();
    assert!(json.get("createdAt").is_some());
    assert_eq!(json["id"], contact.id.to_string());
  }

  #[test]
  fn malformed_id_does_not_parse() {
    assert!("not-a-uuid".parse::<ContactId>().is_err());
    let id = ContactId::new();
    assert_eq!(id.to_string().parse::<ContactId>().unwrap(), id);
  }
}
