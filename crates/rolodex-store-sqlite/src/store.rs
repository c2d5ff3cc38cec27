//! [`SqliteStore`], the SQLite implementation of [`ContactStore`].

use std::path::Path;

use chrono::SubsecRound as _;
use rusqlite::{DatabaseName, OptionalExtension as _, functions::FunctionFlags};

use rolodex_core::{
  contact::{Contact, ContactId, ContactPatch, NewContact},
  query::{ContactQuery, Page, PageMeta},
  store::ContactStore,
};

use crate::{
  encode::{
    encode_dt, encode_id, encode_tags, sort_column, sort_keyword, RawContact,
    CONTACT_COLUMNS,
  },
  schema::{SCHEMA, SCHEMA_VERSION},
  Error, Result,
};

/// Filter shared by the count and page statements. `?1` is the search text;
/// an empty string matches every row. Matching is a literal substring test
/// over each text field and each tag, after Unicode lowercasing with
/// [`FOLD_FUNCTION`].
const SEARCH_FILTER: &str = "
  ?1 = ''
  OR instr(fold(name),    fold(?1)) > 0
  OR instr(fold(email),   fold(?1)) > 0
  OR instr(fold(phone),   fold(?1)) > 0
  OR instr(fold(message), fold(?1)) > 0
  OR EXISTS (
    SELECT 1 FROM json_each(contacts.tags) t
    WHERE instr(fold(t.value), fold(?1)) > 0
  )";

/// Name of the SQL scalar registered on every connection. SQLite's own
/// `lower()` only folds ASCII letters.
const FOLD_FUNCTION: &str = "fold";

/// Register the application's SQL functions on `conn`.
fn register_functions(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    FOLD_FUNCTION,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      let text: Option<String> = ctx.get(0)?;
      Ok(text.map(|t| t.to_lowercase()))
    },
  )
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rolodex record store backed by a single SQLite file.
///
/// Cloning is cheap: the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mainly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Register SQL functions, then create or check the schema. A database
  /// stamped with a newer revision is left untouched and refused.
  async fn init_schema(&self) -> Result<()> {
    let found = self
      .conn
      .call(|conn| {
        register_functions(conn)?;
        let found: i64 =
          conn.pragma_query_value(None::<DatabaseName>, "user_version", |row| row.get(0))?;
        if found <= SCHEMA_VERSION {
          conn.execute_batch(SCHEMA)?;
          conn.pragma_update(None::<DatabaseName>, "user_version", SCHEMA_VERSION)?;
        }
        Ok(found)
      })
      .await?;

    if found > SCHEMA_VERSION {
      return Err(Error::SchemaTooNew { found, supported: SCHEMA_VERSION });
    }
    tracing::debug!(from = found, to = SCHEMA_VERSION, "schema ready");
    Ok(())
  }

  /// Read one row by id on an already-borrowed connection.
  fn select_one(
    conn: &rusqlite::Connection,
    id: &str,
  ) -> rusqlite::Result<Option<RawContact>> {
    conn
      .query_row(
        &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
        rusqlite::params![id],
        RawContact::from_row,
      )
      .optional()
  }
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = crate::Error;

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn query(&self, query: &ContactQuery) -> Result<Page<Contact>> {
    let search = query.search.clone();
    let limit  = i64::from(query.limit);
    let offset = i64::try_from(query.offset()).unwrap_or(i64::MAX);
    let order  = format!(
      "{col} {dir}, seq {dir}",
      col = sort_column(query.sort.field),
      dir = sort_keyword(query.sort.direction),
    );

    tracing::debug!(search = %search, sort = %query.sort, page = query.page, limit, "querying contacts");

    // Count and page are read inside one closure so no write can land
    // between them.
    let (total, raws): (i64, Vec<RawContact>) = self
      .conn
      .call(move |conn| {
        let total: i64 = conn.query_row(
          &format!("SELECT COUNT(*) FROM contacts WHERE {SEARCH_FILTER}"),
          rusqlite::params![search],
          |row| row.get(0),
        )?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {CONTACT_COLUMNS} FROM contacts
           WHERE {SEARCH_FILTER}
           ORDER BY {order}
           LIMIT ?2 OFFSET ?3"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![search, limit, offset], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((total, rows))
      })
      .await?;

    let data = raws
      .into_iter()
      .map(RawContact::into_contact)
      .collect::<Result<Vec<_>>>()?;

    Ok(Page {
      data,
      meta: PageMeta {
        total: u64::try_from(total).unwrap_or_default(),
        page:  query.page,
        limit: query.limit,
      },
    })
  }

  async fn get(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    let raw = self
      .conn
      .call(move |conn| Ok(Self::select_one(conn, &id_str)?))
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn all(&self) -> Result<Vec<Contact>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY seq"))?;
        let rows = stmt
          .query_map([], RawContact::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_contact).collect()
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn create(&self, input: NewContact) -> Result<Contact> {
    let mut contact = Contact::from_new(input);
    // Match the stored precision so the returned record equals a re-read.
    contact.created_at = contact.created_at.trunc_subsecs(6);

    let id_str   = encode_id(contact.id);
    let name     = contact.name.clone();
    let email    = contact.email.clone();
    let phone    = contact.phone.clone();
    let message  = contact.message.clone();
    let tags_str = encode_tags(&contact.tags)?;
    let at_str   = encode_dt(contact.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO contacts (id, name, email, phone, message, tags, favorite, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, 0, ?7)",
          rusqlite::params![id_str, name, email, phone, message, tags_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(id = %contact.id, "created contact");
    Ok(contact)
  }

  async fn update(&self, id: ContactId, patch: ContactPatch) -> Result<Option<Contact>> {
    let id_str   = encode_id(id);
    let tags_str = patch.tags.as_deref().map(encode_tags).transpose()?;
    let ContactPatch { name, email, phone, message, favorite, .. } = patch;

    // Absent fields bind NULL and keep their current value.
    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "UPDATE contacts SET
             name     = COALESCE(?2, name),
             email    = COALESCE(?3, email),
             phone    = COALESCE(?4, phone),
             message  = COALESCE(?5, message),
             tags     = COALESCE(?6, tags),
             favorite = COALESCE(?7, favorite)
           WHERE id = ?1",
          rusqlite::params![id_str, name, email, phone, message, tags_str, favorite],
        )?;
        let raw = Self::select_one(&tx, &id_str)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }

  async fn delete(&self, id: ContactId) -> Result<bool> {
    let id_str = encode_id(id);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM contacts WHERE id = ?1", rusqlite::params![id_str])?)
      })
      .await?;

    Ok(removed > 0)
  }

  async fn delete_many(&self, ids: Vec<ContactId>) -> Result<u64> {
    let id_strs: Vec<String> = ids.into_iter().map(encode_id).collect();

    let removed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut removed = 0usize;
        {
          let mut stmt = tx.prepare("DELETE FROM contacts WHERE id = ?1")?;
          for id in &id_strs {
            removed += stmt.execute(rusqlite::params![id])?;
          }
        }
        tx.commit()?;
        Ok(removed)
      })
      .await?;

    tracing::debug!(removed, "bulk delete");
    Ok(removed as u64)
  }

  async fn toggle_favorite(&self, id: ContactId) -> Result<Option<Contact>> {
    let id_str = encode_id(id);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "UPDATE contacts SET favorite = NOT favorite WHERE id = ?1",
          rusqlite::params![id_str],
        )?;
        let raw = Self::select_one(&tx, &id_str)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawContact::into_contact).transpose()
  }
}
