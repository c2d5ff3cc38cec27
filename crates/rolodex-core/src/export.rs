//! CSV export of the full contact collection.

use std::io::Write;

use chrono::SecondsFormat;

use crate::{contact::Contact, Error, Result};

/// Header row, in column order.
pub const HEADER: [&str; 7] = [
  "Name", "Email", "Phone", "Message", "Tags", "Favorite", "CreatedAt",
];

/// Separator placed between tags inside the single `Tags` column.
pub const TAG_SEPARATOR: &str = "|";

/// Write `contacts` as CSV to `out`, returning the writer once flushed.
///
/// The header is written even when `contacts` is empty. Quoting of commas,
/// quotes and line breaks is handled by the `csv` writer.
pub fn write_csv<W: Write>(out: W, contacts: &[Contact]) -> Result<W> {
  let mut writer = csv::Writer::from_writer(out);
  writer.write_record(HEADER)?;

  for c in contacts {
    let tags       = c.tags.join(TAG_SEPARATOR);
    let created_at = c.created_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    writer.write_record([
      c.name.as_str(),
      c.email.as_str(),
      c.phone.as_str(),
      c.message.as_str(),
      tags.as_str(),
      if c.favorite { "yes" } else { "no" },
      created_at.as_str(),
    ])?;
  }

  writer.into_inner().map_err(|e| Error::Io(e.into_error()))
}

/// Render `contacts` as an in-memory CSV document.
pub fn to_csv(contacts: &[Contact]) -> Result<Vec<u8>> { write_csv(Vec::new(), contacts) }
