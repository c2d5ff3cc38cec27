//! Integration tests for `SqliteStore` against an in-memory database.

use std::collections::HashSet;

use rolodex_core::{
  contact::{ContactId, ContactPatch, NewContact},
  query::{ContactQuery, SortDirection, SortField, SortSpec},
  store::ContactStore,
};

use crate::{Error, SqliteStore, schema::SCHEMA_VERSION};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new(name: &str, email: &str) -> NewContact {
  NewContact::new(name, email, "5551234567").unwrap()
}

fn search(text: &str) -> ContactQuery {
  ContactQuery::default().with_search(text)
}

// ─── Create / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get() {
  let s = store().await;

  let created = s.create(new("Ann Lee", "ann@x.com")).await.unwrap();
  assert!(!created.favorite);
  assert_eq!(created.message, "");

  let fetched = s.get(created.id).await.unwrap().expect("stored");
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get(ContactId::new()).await.unwrap().is_none());
}

// ─── Query engine ────────────────────────────────────────────────────────────

#[tokio::test]
async fn created_contact_is_found_by_search() {
  let s = store().await;
  s.create(new("Bob Ray", "bob@y.org")).await.unwrap();
  let ann = s.create(new("Ann Lee", "ann@x.com")).await.unwrap();

  let page = s.query(&search("ann lee")).await.unwrap();
  assert_eq!(page.meta.total, 1);
  assert_eq!(page.data.len(), 1);
  assert_eq!(page.data[0].id, ann.id);
}

#[tokio::test]
async fn search_is_case_insensitive_across_fields() {
  let s = store().await;
  let jane = s.create(new("J. Doe", "Jane@Example.com")).await.unwrap();
  let tagged = s
    .create(new("Tom", "tom@z.net").with_tags(["Colleague"]))
    .await
    .unwrap();
  let noted = s
    .create(new("Kim", "kim@z.net").with_message("Met at JANE's party"))
    .await
    .unwrap();

  let found: HashSet<_> = s
    .query(&search("jane"))
    .await
    .unwrap()
    .data
    .into_iter()
    .map(|c| c.id)
    .collect();
  assert_eq!(found, HashSet::from([jane.id, noted.id]));

  let by_tag = s.query(&search("colleag")).await.unwrap();
  assert_eq!(by_tag.data.len(), 1);
  assert_eq!(by_tag.data[0].id, tagged.id);

  let by_phone = s.query(&search("12345")).await.unwrap();
  assert_eq!(by_phone.meta.total, 3);
}

#[tokio::test]
async fn search_folds_non_ascii_case() {
  let s = store().await;
  let emile = s.create(new("ÉMILE ZOLA", "ez@x.fr")).await.unwrap();
  let jurgen = s
    .create(new("Jürgen", "jk@x.de").with_tags(["MÜNCHEN"]))
    .await
    .unwrap();

  let by_name = s.query(&search("émile")).await.unwrap();
  assert_eq!(by_name.meta.total, 1);
  assert_eq!(by_name.data[0].id, emile.id);

  let by_tag = s.query(&search("münchen")).await.unwrap();
  assert_eq!(by_tag.meta.total, 1);
  assert_eq!(by_tag.data[0].id, jurgen.id);

  let upper = s.query(&search("JÜRGEN")).await.unwrap();
  assert_eq!(upper.meta.total, 1);
  assert_eq!(upper.data[0].id, jurgen.id);
}

#[tokio::test]
async fn search_text_is_literal() {
  let s = store().await;
  s.create(new("Ann", "ann@x.com")).await.unwrap();
  s.create(new("100% Real", "real@x.com")).await.unwrap();

  let page = s.query(&search("%")).await.unwrap();
  assert_eq!(page.meta.total, 1);
  assert_eq!(page.data[0].name, "100% Real");

  assert_eq!(s.query(&search("_")).await.unwrap().meta.total, 0);
}

#[tokio::test]
async fn pages_partition_the_sorted_set() {
  let s = store().await;
  for i in 0..15 {
    s.create(new(&format!("Person {i:02}"), &format!("p{i}@x.com")))
      .await
      .unwrap();
  }

  let everything = s
    .query(&ContactQuery { limit: 100, ..ContactQuery::default() })
    .await
    .unwrap();
  assert_eq!(everything.data.len(), 15);

  let first = s.query(&ContactQuery::default()).await.unwrap();
  let second = s.query(&ContactQuery::default().with_page(2)).await.unwrap();
  assert_eq!(first.data.len(), 10);
  assert_eq!(second.data.len(), 5);
  assert_eq!(first.meta.total, 15);
  assert_eq!(second.meta.total, 15);
  assert_eq!(second.meta.page, 2);

  let stitched: Vec<_> = first
    .data
    .iter()
    .chain(second.data.iter())
    .map(|c| c.id)
    .collect();
  let expected: Vec<_> = everything.data.iter().map(|c| c.id).collect();
  assert_eq!(stitched, expected);
}

#[tokio::test]
async fn out_of_range_page_is_empty_with_total() {
  let s = store().await;
  s.create(new("Ann", "ann@x.com")).await.unwrap();

  let page = s.query(&ContactQuery::default().with_page(9)).await.unwrap();
  assert!(page.data.is_empty());
  assert_eq!(page.meta.total, 1);
}

#[tokio::test]
async fn default_sort_is_newest_first() {
  let s = store().await;
  let first = s.create(new("First", "a@x.com")).await.unwrap();
  let last = s.create(new("Last", "b@x.com")).await.unwrap();

  let page = s.query(&ContactQuery::default()).await.unwrap();
  assert_eq!(page.data[0].id, last.id);
  assert_eq!(page.data[1].id, first.id);
}

#[tokio::test]
async fn name_sort_is_monotonic() {
  let s = store().await;
  for name in ["Mia", "Al", "Zoe", "Bea", "Al"] {
    s.create(new(name, "x@x.com")).await.unwrap();
  }

  let asc = ContactQuery::default().with_sort(SortSpec::parse("name_asc"));
  let names: Vec<_> = s
    .query(&asc)
    .await
    .unwrap()
    .data
    .into_iter()
    .map(|c| c.name)
    .collect();
  assert!(names.windows(2).all(|w| w[0] <= w[1]), "{names:?}");

  let desc = asc.with_sort(SortSpec::new(SortField::Name, SortDirection::Desc));
  let first = s.query(&desc).await.unwrap().data.remove(0);
  assert_eq!(first.name, "Zoe");
}

// ─── Mutations ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_applies_partial_fields() {
  let s = store().await;
  let ann = s.create(new("Ann", "ann@x.com").with_tags(["a"])).await.unwrap();

  let updated = s
    .update(ann.id, ContactPatch {
      email: Some("ann@new.com".into()),
      tags: Some(vec!["b".into(), "c".into()]),
      ..ContactPatch::default()
    })
    .await
    .unwrap()
    .expect("exists");

  assert_eq!(updated.id, ann.id);
  assert_eq!(updated.created_at, ann.created_at);
  assert_eq!(updated.name, "Ann");
  assert_eq!(updated.email, "ann@new.com");
  assert_eq!(updated.tags, vec!["b".to_string(), "c".to_string()]);
}

#[tokio::test]
async fn update_unknown_returns_none() {
  let s = store().await;
  let patch = ContactPatch { name: Some("X".into()), ..ContactPatch::default() };
  assert!(s.update(ContactId::new(), patch).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_removes_from_reads() {
  let s = store().await;
  let ann = s.create(new("Ann", "ann@x.com")).await.unwrap();

  assert!(s.delete(ann.id).await.unwrap());
  assert!(!s.delete(ann.id).await.unwrap());
  assert!(s.get(ann.id).await.unwrap().is_none());

  let page = s.query(&ContactQuery::default()).await.unwrap();
  assert!(page.data.is_empty());
  assert_eq!(page.meta.total, 0);
}

#[tokio::test]
async fn delete_many_counts_only_existing() {
  let s = store().await;
  let a = s.create(new("A", "a@x.com")).await.unwrap();
  let b = s.create(new("B", "b@x.com")).await.unwrap();
  let c = s.create(new("C", "c@x.com")).await.unwrap();

  let removed = s
    .delete_many(vec![a.id, c.id, ContactId::new(), a.id])
    .await
    .unwrap();
  assert_eq!(removed, 2);

  let left = s.all().await.unwrap();
  assert_eq!(left.len(), 1);
  assert_eq!(left[0].id, b.id);
}

#[tokio::test]
async fn toggle_favorite_twice_restores() {
  let s = store().await;
  let ann = s.create(new("Ann", "ann@x.com")).await.unwrap();

  let once = s.toggle_favorite(ann.id).await.unwrap().unwrap();
  assert!(once.favorite);
  let twice = s.toggle_favorite(ann.id).await.unwrap().unwrap();
  assert!(!twice.favorite);

  assert!(s.toggle_favorite(ContactId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn all_ignores_query_state_and_keeps_insertion_order() {
  let s = store().await;
  let a = s.create(new("Zed", "z@x.com")).await.unwrap();
  let b = s.create(new("Amy", "a@x.com")).await.unwrap();

  let ids: Vec<_> = s.all().await.unwrap().into_iter().map(|c| c.id).collect();
  assert_eq!(ids, vec![a.id, b.id]);
}

// ─── Schema revision ─────────────────────────────────────────────────────────

fn scratch_db() -> std::path::PathBuf {
  std::env::temp_dir().join(format!("rolodex-{}.db", uuid::Uuid::new_v4()))
}

fn remove_db(path: &std::path::Path) {
  for suffix in ["", "-wal", "-shm"] {
    let mut p = path.as_os_str().to_owned();
    p.push(suffix);
    let _ = std::fs::remove_file(p);
  }
}

fn user_version(path: &std::path::Path) -> i64 {
  rusqlite::Connection::open(path)
    .unwrap()
    .pragma_query_value(None, "user_version", |row| row.get(0))
    .unwrap()
}

#[tokio::test]
async fn open_stamps_and_reopens_schema_revision() {
  let path = scratch_db();

  let first = SqliteStore::open(&path).await.unwrap();
  let kept = first.create(new("Ann", "ann@x.com")).await.unwrap();
  drop(first);
  assert_eq!(user_version(&path), SCHEMA_VERSION);

  let again = SqliteStore::open(&path).await.unwrap();
  assert_eq!(again.get(kept.id).await.unwrap(), Some(kept));
  drop(again);

  remove_db(&path);
}

#[tokio::test]
async fn open_refuses_newer_schema_revision() {
  let path = scratch_db();
  drop(SqliteStore::open(&path).await.unwrap());

  rusqlite::Connection::open(&path)
    .unwrap()
    .pragma_update(None, "user_version", 99_i64)
    .unwrap();

  match SqliteStore::open(&path).await {
    Err(Error::SchemaTooNew { found, supported }) => {
      assert_eq!(found, 99);
      assert_eq!(supported, SCHEMA_VERSION);
    }
    Err(other) => panic!("unexpected error: {other}"),
    Ok(_) => panic!("newer schema revision was accepted"),
  }
  assert_eq!(user_version(&path), 99);

  remove_db(&path);
}
