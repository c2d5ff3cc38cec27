//! List query parameters and the paginated result envelope.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not supply one.
pub const DEFAULT_LIMIT: u32 = 10;

// ─── Sorting ─────────────────────────────────────────────────────────────────

/// Contact fields a list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
  Name,
  Email,
  Phone,
  #[default]
  CreatedAt,
  Favorite,
}

impl SortField {
  pub const ALL: [SortField; 5] = [
    SortField::CreatedAt,
    SortField::Name,
    SortField::Email,
    SortField::Phone,
    SortField::Favorite,
  ];

  /// Wire name, matching the JSON key of the field.
  pub fn as_str(self) -> &'static str {
    match self {
      SortField::Name => "name",
      SortField::Email => "email",
      SortField::Phone => "phone",
      SortField::CreatedAt => "createdAt",
      SortField::Favorite => "favorite",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|f| f.as_str() == s)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
  Asc,
  #[default]
  Desc,
}

impl SortDirection {
  pub fn as_str(self) -> &'static str {
    match self {
      SortDirection::Asc => "asc",
      SortDirection::Desc => "desc",
    }
  }
}

/// A sort key and direction; wire form `<field>_<asc|desc>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
  pub field:     SortField,
  pub direction: SortDirection,
}

impl SortSpec {
  pub fn new(field: SortField, direction: SortDirection) -> Self {
    Self { field, direction }
  }

  /// Lenient parse: an unknown field means `createdAt`, and anything other
  /// than `asc` means descending. Never fails.
  pub fn parse(s: &str) -> Self {
    let (field, dir) = s.trim().rsplit_once('_').unwrap_or((s.trim(), ""));
    Self {
      field:     SortField::parse(field).unwrap_or_default(),
      direction: if dir == "asc" {
        SortDirection::Asc
      } else {
        SortDirection::Desc
      },
    }
  }
}

impl fmt::Display for SortSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}_{}", self.field.as_str(), self.direction.as_str())
  }
}

// ─── Query ───────────────────────────────────────────────────────────────────

/// A filtered, sorted, paginated read over the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactQuery {
  /// Case-insensitive literal substring; empty matches everything.
  pub search: String,
  pub sort:   SortSpec,
  /// 1-based page number; always ≥ 1.
  pub page:   u32,
  /// Page size; always ≥ 1.
  pub limit:  u32,
}

impl Default for ContactQuery {
  fn default() -> Self {
    Self {
      search: String::new(),
      sort:   SortSpec::default(),
      page:   1,
      limit:  DEFAULT_LIMIT,
    }
  }
}

impl ContactQuery {
  /// Build a query, trimming the search text and clamping `page` and `limit`
  /// to a minimum of 1.
  pub fn new(search: impl AsRef<str>, sort: SortSpec, page: i64, limit: i64) -> Self {
    Self {
      search: search.as_ref().trim().to_owned(),
      sort,
      page: clamp_positive(page),
      limit: clamp_positive(limit),
    }
  }

  /// Number of matching records that precede this page.
  pub fn offset(&self) -> u64 { u64::from(self.page - 1) * u64::from(self.limit) }

  pub fn with_search(self, search: impl AsRef<str>) -> Self {
    Self { search: search.as_ref().trim().to_owned(), page: 1, ..self }
  }

  pub fn with_sort(self, sort: SortSpec) -> Self { Self { sort, ..self } }

  pub fn with_page(self, page: i64) -> Self {
    Self { page: clamp_positive(page), ..self }
  }
}

fn clamp_positive(n: i64) -> u32 { n.clamp(1, i64::from(u32::MAX)) as u32 }

// ─── Envelope ────────────────────────────────────────────────────────────────

/// Pagination metadata; `total` counts every record matching the filter,
/// not just this page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
  pub total: u64,
  pub page:  u32,
  pub limit: u32,
}

impl Default for PageMeta {
  fn default() -> Self { Self { total: 0, page: 1, limit: DEFAULT_LIMIT } }
}

impl PageMeta {
  /// Number of pages needed to show `total` records; at least 1.
  pub fn page_count(&self) -> u32 {
    let limit = u64::from(self.limit.max(1));
    self.total.div_ceil(limit).clamp(1, u64::from(u32::MAX)) as u32
  }
}

/// The `{data, meta}` envelope returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
  pub data: Vec<T>,
  pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sort_spec_parses_wire_form() {
    let spec = SortSpec::parse("name_asc");
    assert_eq!(spec, SortSpec::new(SortField::Name, SortDirection::Asc));
    assert_eq!(spec.to_string(), "name_asc");

    assert_eq!(
      SortSpec::parse("createdAt_desc"),
      SortSpec::default()
    );
  }

  #[test]
  fn sort_spec_falls_back_leniently() {
    assert_eq!(SortSpec::parse(""), SortSpec::default());
    assert_eq!(
      SortSpec::parse("bogus_asc"),
      SortSpec::new(SortField::CreatedAt, SortDirection::Asc)
    );
    assert_eq!(
      SortSpec::parse("email_sideways"),
      SortSpec::new(SortField::Email, SortDirection::Desc)
    );
    assert_eq!(
      SortSpec::parse("phone"),
      SortSpec::new(SortField::Phone, SortDirection::Desc)
    );
  }

  #[test]
  fn query_clamps_page_and_limit() {
    let q = ContactQuery::new("  ann ", SortSpec::default(), 0, -5);
    assert_eq!(q.search, "ann");
    assert_eq!(q.page, 1);
    assert_eq!(q.limit, 1);
    assert_eq!(q.offset(), 0);

    let q = ContactQuery::new("", SortSpec::default(), 3, 10);
    assert_eq!(q.offset(), 20);
  }

  #[test]
  fn new_search_resets_page() {
    let q = ContactQuery::default().with_page(4).with_search("x");
    assert_eq!(q.page, 1);
  }

  #[test]
  fn page_count_rounds_up() {
    let meta = PageMeta { total: 15, page: 1, limit: 10 };
    assert_eq!(meta.page_count(), 2);
    let empty = PageMeta { total: 0, page: 1, limit: 10 };
    assert_eq!(empty.page_count(), 1);
  }
}
