//! The "add contact" form and its validation rules.
//!
//! Fields, keystroke filters and validation rules are declared once in
//! [`FIELDS`]; everything else in the form is driven from that table.
//! Validation here only gates local submission. The server re-checks required
//! fields on its own.

use std::collections::{BTreeMap, BTreeSet};

use rolodex_core::contact::ContactDraft;

// ─── Field table ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
  Name,
  Email,
  Phone,
  Message,
  Tags,
}

/// A check over a field's current text, with the message shown on failure.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
  pub check:   fn(&str) -> bool,
  pub message: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
  pub field:       Field,
  pub label:       &'static str,
  pub placeholder: &'static str,
  /// Characters typed into the field are dropped unless this accepts them.
  pub accepts:     fn(char) -> bool,
  pub max_len:     Option<usize>,
  pub rule:        Option<Rule>,
}

pub static FIELDS: [FieldSpec; 5] = [
  FieldSpec {
    field:       Field::Name,
    label:       "Name",
    placeholder: "Full Name",
    accepts:     any_char,
    max_len:     None,
    rule:        Some(Rule {
      check:   is_valid_name,
      message: "Name must be at least 2 characters",
    }),
  },
  FieldSpec {
    field:       Field::Email,
    label:       "Email",
    placeholder: "Email Address",
    accepts:     any_char,
    max_len:     None,
    rule:        Some(Rule { check: is_valid_email, message: "Invalid email format" }),
  },
  FieldSpec {
    field:       Field::Phone,
    label:       "Phone",
    placeholder: "10-digit Phone Number",
    accepts:     is_ascii_digit,
    max_len:     Some(PHONE_DIGITS),
    rule:        Some(Rule {
      check:   is_valid_phone,
      message: "Invalid phone number (10 digits required)",
    }),
  },
  FieldSpec {
    field:       Field::Message,
    label:       "Message",
    placeholder: "Message (optional)",
    accepts:     any_char,
    max_len:     None,
    rule:        None,
  },
  FieldSpec {
    field:       Field::Tags,
    label:       "Tags",
    placeholder: "comma, separated (optional)",
    accepts:     any_char,
    max_len:     None,
    rule:        None,
  },
];

const PHONE_DIGITS: usize = 10;

impl Field {
  pub fn spec(self) -> &'static FieldSpec {
    FIELDS
      .iter()
      .find(|s| s.field == self)
      .unwrap_or(&FIELDS[0])
  }
}

// ─── Rules ────────────────────────────────────────────────────────────────────

fn any_char(c: char) -> bool { !c.is_control() }

fn is_ascii_digit(c: char) -> bool { c.is_ascii_digit() }

pub fn is_valid_name(s: &str) -> bool { s.trim().chars().count() >= 2 }

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot in the
/// domain with something on both sides of it.
pub fn is_valid_email(s: &str) -> bool {
  if s.is_empty() || s.chars().any(char::is_whitespace) {
    return false;
  }
  let Some((local, domain)) = s.split_once('@') else {
    return false;
  };
  if local.is_empty() || domain.contains('@') {
    return false;
  }
  domain
    .rsplit_once('.')
    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

pub fn is_valid_phone(s: &str) -> bool {
  s.len() == PHONE_DIGITS && s.chars().all(|c| c.is_ascii_digit())
}

// ─── Form state ───────────────────────────────────────────────────────────────

/// Result of validating the current values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
  /// Messages for touched fields that fail their rule.
  pub errors:      BTreeMap<Field, &'static str>,
  /// Every rule passes, touched or not.
  pub submittable: bool,
}

/// Editable form values plus focus and touch tracking.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
  values:  BTreeMap<Field, String>,
  touched: BTreeSet<Field>,
  focus:   usize,
}

impl ContactForm {
  pub fn new() -> Self { Self::default() }

  pub fn value(&self, field: Field) -> &str {
    self.values.get(&field).map(String::as_str).unwrap_or_default()
  }

  pub fn focused(&self) -> Field { FIELDS[self.focus].field }

  pub fn focus_next(&mut self) { self.focus = (self.focus + 1) % FIELDS.len(); }

  pub fn focus_prev(&mut self) {
    self.focus = (self.focus + FIELDS.len() - 1) % FIELDS.len();
  }

  /// Type one character into `field`. Characters the field does not accept,
  /// or that would exceed its length limit, are dropped. Returns whether the
  /// character was taken.
  pub fn input(&mut self, field: Field, c: char) -> bool {
    let spec = field.spec();
    if !(spec.accepts)(c) {
      return false;
    }
    let value = self.values.entry(field).or_default();
    if spec.max_len.is_some_and(|max| value.chars().count() >= max) {
      return false;
    }
    value.push(c);
    self.touched.insert(field);
    true
  }

  /// Type a string, one character at a time through the same filter.
  pub fn input_str(&mut self, field: Field, s: &str) {
    for c in s.chars() {
      self.input(field, c);
    }
  }

  pub fn backspace(&mut self, field: Field) {
    if let Some(value) = self.values.get_mut(&field) {
      value.pop();
    }
    self.touched.insert(field);
  }

  /// Mark every field as touched so all failing rules are reported.
  pub fn touch_all(&mut self) { self.touched.extend(FIELDS.iter().map(|s| s.field)); }

  pub fn validate(&self) -> Validation {
    let mut errors = BTreeMap::new();
    let mut submittable = true;

    for spec in &FIELDS {
      let Some(rule) = spec.rule else { continue };
      if (rule.check)(self.value(spec.field)) {
        continue;
      }
      submittable = false;
      if self.touched.contains(&spec.field) {
        errors.insert(spec.field, rule.message);
      }
    }

    Validation { errors, submittable }
  }

  /// Build the create request body from the current values.
  pub fn to_draft(&self) -> ContactDraft {
    let message = self.value(Field::Message).trim();
    let tags: Vec<String> = self
      .value(Field::Tags)
      .split(',')
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .map(str::to_owned)
      .collect();

    ContactDraft {
      name:    Some(self.value(Field::Name).trim().to_owned()),
      email:   Some(self.value(Field::Email).trim().to_owned()),
      phone:   Some(self.value(Field::Phone).to_owned()),
      message: (!message.is_empty()).then(|| message.to_owned()),
      tags:    (!tags.is_empty()).then_some(tags),
    }
  }

  pub fn reset(&mut self) { *self = Self::default(); }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn filled(name: &str, email: &str, phone: &str) -> ContactForm {
    let mut form = ContactForm::new();
    form.input_str(Field::Name, name);
    form.input_str(Field::Email, email);
    form.input_str(Field::Phone, phone);
    form
  }

  #[test]
  fn untouched_form_shows_no_errors_but_cannot_submit() {
    let v = ContactForm::new().validate();
    assert!(v.errors.is_empty());
    assert!(!v.submittable);
  }

  #[test]
  fn valid_form_is_submittable() {
    let v = filled("Ann Lee", "ann@x.com", "5551234567").validate();
    assert!(v.errors.is_empty(), "{:?}", v.errors);
    assert!(v.submittable);
  }

  #[test]
  fn each_rule_reports_its_message() {
    let v = filled(" A ", "ann@x", "555").validate();
    assert!(!v.submittable);
    assert_eq!(v.errors[&Field::Name], "Name must be at least 2 characters");
    assert_eq!(v.errors[&Field::Email], "Invalid email format");
    assert_eq!(v.errors[&Field::Phone], "Invalid phone number (10 digits required)");
  }

  #[test]
  fn phone_rejects_non_digits_at_keystroke() {
    let mut form = ContactForm::new();
    assert!(!form.input(Field::Phone, 'a'));
    assert!(!form.input(Field::Phone, '-'));
    form.input_str(Field::Phone, "(555) 123-4567 89");
    assert_eq!(form.value(Field::Phone), "5551234567");
    assert!(!form.input(Field::Phone, '8'));
  }

  #[test]
  fn email_shape() {
    assert!(is_valid_email("jane@example.com"));
    assert!(is_valid_email("j.doe+tag@mail.example.org"));
    assert!(!is_valid_email("jane@example"));
    assert!(!is_valid_email("@example.com"));
    assert!(!is_valid_email("jane@@example.com"));
    assert!(!is_valid_email("ja ne@example.com"));
    assert!(!is_valid_email("jane@example."));
    assert!(!is_valid_email(""));
  }

  #[test]
  fn touch_all_reveals_errors() {
    let mut form = ContactForm::new();
    form.touch_all();
    assert_eq!(form.validate().errors.len(), 3);
  }

  #[test]
  fn draft_splits_tags_and_drops_empty_message() {
    let mut form = filled("Ann Lee", "ann@x.com", "5551234567");
    form.input_str(Field::Tags, "work, gym ,,");
    let draft = form.to_draft();
    assert_eq!(draft.name.as_deref(), Some("Ann Lee"));
    assert_eq!(draft.tags, Some(vec!["work".to_string(), "gym".to_string()]));
    assert!(draft.message.is_none());
  }

  #[test]
  fn focus_wraps() {
    let mut form = ContactForm::new();
    assert_eq!(form.focused(), Field::Name);
    form.focus_prev();
    assert_eq!(form.focused(), Field::Tags);
    form.focus_next();
    assert_eq!(form.focused(), Field::Name);
  }
}
