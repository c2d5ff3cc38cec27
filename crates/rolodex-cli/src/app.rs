//! Application state machine and event dispatcher.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rolodex_core::{
  contact::Contact,
  query::{SortDirection, SortField, SortSpec},
};

use crate::{
  controller::{ContactsBackend, Controller},
  form::ContactForm,
};

/// Sort orders reachable with `s`, in cycling order.
pub const SORT_PRESETS: [(&str, SortSpec); 5] = [
  ("Newest", SortSpec { field: SortField::CreatedAt, direction: SortDirection::Desc }),
  ("Oldest", SortSpec { field: SortField::CreatedAt, direction: SortDirection::Asc }),
  ("Name A–Z", SortSpec { field: SortField::Name, direction: SortDirection::Asc }),
  ("Name Z–A", SortSpec { field: SortField::Name, direction: SortDirection::Desc }),
  ("Favorites", SortSpec { field: SortField::Favorite, direction: SortDirection::Desc }),
];

// ─── Mode ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
  /// Navigating the contact list.
  Browse,
  /// Typing a search query.
  Search,
  /// Filling in the add-contact form.
  Form,
  /// Waiting for `y` to confirm deleting the contact under the cursor.
  ConfirmDelete,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<B> {
  pub mode: Mode,

  /// List state and server operations.
  pub controller: Controller<B>,

  /// Cursor position within the current page.
  pub cursor: usize,

  /// Search text being edited (only meaningful in [`Mode::Search`]).
  pub search_input: String,

  pub form: ContactForm,

  /// Index into [`SORT_PRESETS`].
  pub sort_preset: usize,

  /// Where `x` writes the CSV export.
  pub export_path: PathBuf,
}

impl<B: ContactsBackend> App<B> {
  pub fn new(backend: B, export_path: PathBuf) -> Self {
    Self {
      mode: Mode::Browse,
      controller: Controller::new(backend),
      cursor: 0,
      search_input: String::new(),
      form: ContactForm::new(),
      sort_preset: 0,
      export_path,
    }
  }

  /// The contact under the cursor, if any.
  pub fn cursor_contact(&self) -> Option<&Contact> {
    self.controller.state().contacts.get(self.cursor)
  }

  pub fn sort_label(&self) -> &'static str { SORT_PRESETS[self.sort_preset].0 }

  /// Keep the cursor on a row after the list changed underneath it.
  fn clamp_cursor(&mut self) {
    let len = self.controller.state().contacts.len();
    self.cursor = self.cursor.min(len.saturating_sub(1));
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    let cont = match self.mode {
      Mode::Browse => self.handle_browse_key(key).await,
      Mode::Search => {
        self.handle_search_key(key).await;
        true
      }
      Mode::Form => {
        self.handle_form_key(key).await;
        true
      }
      Mode::ConfirmDelete => {
        self.handle_confirm_key(key).await;
        true
      }
    };
    self.clamp_cursor();
    Ok(cont)
  }

  async fn handle_browse_key(&mut self, key: KeyEvent) -> bool {
    self.controller.clear_notice();
    match key.code {
      KeyCode::Char('q') => return false,

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.controller.state().contacts.len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }
      KeyCode::Right | KeyCode::Char('n') => {
        if self.controller.next_page().await {
          self.cursor = 0;
        }
      }
      KeyCode::Left | KeyCode::Char('p') => {
        if self.controller.prev_page().await {
          self.cursor = 0;
        }
      }

      // Query
      KeyCode::Char('/') => {
        self.search_input = self.controller.query().search.clone();
        self.mode = Mode::Search;
      }
      KeyCode::Char('s') => {
        self.sort_preset = (self.sort_preset + 1) % SORT_PRESETS.len();
        self.controller.set_sort(SORT_PRESETS[self.sort_preset].1).await;
        self.cursor = 0;
      }
      KeyCode::Char('r') => self.controller.reload().await,

      // Mutations
      KeyCode::Char('a') => {
        self.form.reset();
        self.mode = Mode::Form;
      }
      KeyCode::Char('d') => {
        if self.cursor_contact().is_some() {
          self.mode = Mode::ConfirmDelete;
        }
      }
      KeyCode::Char('f') => {
        if let Some(id) = self.cursor_contact().map(|c| c.id) {
          self.controller.toggle_favorite(id).await;
        }
      }
      KeyCode::Char('x') => {
        let path = self.export_path.clone();
        self.controller.export_to(&path).await;
      }

      _ => {}
    }
    true
  }

  async fn handle_search_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.search_input.clear();
        self.mode = Mode::Browse;
      }
      KeyCode::Enter => {
        let text = std::mem::take(&mut self.search_input);
        self.mode = Mode::Browse;
        self.cursor = 0;
        self.controller.set_search(&text).await;
      }
      KeyCode::Backspace => {
        self.search_input.pop();
      }
      KeyCode::Char(c) => self.search_input.push(c),
      _ => {}
    }
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    let field = self.form.focused();
    match key.code {
      KeyCode::Esc => {
        self.form.reset();
        self.mode = Mode::Browse;
      }
      KeyCode::Tab | KeyCode::Down => self.form.focus_next(),
      KeyCode::BackTab | KeyCode::Up => self.form.focus_prev(),
      KeyCode::Backspace => self.form.backspace(field),
      KeyCode::Enter => {
        if !self.form.validate().submittable {
          self.form.touch_all();
          return;
        }
        let draft = self.form.to_draft();
        if self.controller.add_contact(draft).await {
          self.form.reset();
          self.mode = Mode::Browse;
          self.cursor = 0;
        }
      }
      KeyCode::Char(c) => {
        self.form.input(field, c);
      }
      _ => {}
    }
  }

  async fn handle_confirm_key(&mut self, key: KeyEvent) {
    self.mode = Mode::Browse;
    if key.code != KeyCode::Char('y') {
      return;
    }
    if let Some(id) = self.cursor_contact().map(|c| c.id) {
      self.controller.delete_contact(id).await;
    }
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::KeyEvent;

  use super::*;
  use crate::{controller::fake::FakeBackend, form::Field};

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  async fn type_str(app: &mut App<FakeBackend>, s: &str) {
    for c in s.chars() {
      app.handle_key(key(KeyCode::Char(c))).await.unwrap();
    }
  }

  async fn app(names: &[&str]) -> App<FakeBackend> {
    let mut app = App::new(FakeBackend::with_names(names), PathBuf::from("contacts.csv"));
    app.controller.activate().await;
    app
  }

  #[tokio::test]
  async fn quit_keys() {
    let mut app = app(&[]).await;
    assert!(!app.handle_key(key(KeyCode::Char('q'))).await.unwrap());
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(!app.handle_key(ctrl_c).await.unwrap());
  }

  #[tokio::test]
  async fn form_submits_only_when_valid() {
    let mut app = app(&[]).await;
    app.handle_key(key(KeyCode::Char('a'))).await.unwrap();
    assert_eq!(app.mode, Mode::Form);

    type_str(&mut app, "Ann Lee").await;
    app.handle_key(key(KeyCode::Enter)).await.unwrap();
    // Still in the form with errors revealed.
    assert_eq!(app.mode, Mode::Form);
    assert!(app.form.validate().errors.contains_key(&Field::Email));

    app.handle_key(key(KeyCode::Tab)).await.unwrap();
    type_str(&mut app, "ann@x.com").await;
    app.handle_key(key(KeyCode::Tab)).await.unwrap();
    type_str(&mut app, "555-123-4567").await;
    assert_eq!(app.form.value(Field::Phone), "5551234567");

    app.handle_key(key(KeyCode::Enter)).await.unwrap();
    assert_eq!(app.mode, Mode::Browse);
    assert_eq!(app.controller.state().meta.total, 1);
  }

  #[tokio::test]
  async fn delete_requires_confirmation() {
    let mut app = app(&["Ann", "Bob"]).await;

    app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
    assert_eq!(app.mode, Mode::ConfirmDelete);
    app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
    assert_eq!(app.controller.state().meta.total, 2);

    app.handle_key(key(KeyCode::Char('j'))).await.unwrap();
    app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
    app.handle_key(key(KeyCode::Char('y'))).await.unwrap();
    assert_eq!(app.controller.state().meta.total, 1);
    assert_eq!(app.cursor, 0);
  }

  #[tokio::test]
  async fn search_mode_applies_on_enter() {
    let mut app = app(&["Ann", "Bob", "Annie"]).await;
    app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
    type_str(&mut app, "ann").await;
    assert_eq!(app.controller.state().meta.total, 3);

    app.handle_key(key(KeyCode::Enter)).await.unwrap();
    assert_eq!(app.mode, Mode::Browse);
    assert_eq!(app.controller.query().search, "ann");
    assert_eq!(app.controller.state().meta.total, 2);
  }

  #[tokio::test]
  async fn sort_cycles_through_presets() {
    let mut app = app(&["Bob", "Ann"]).await;
    app.handle_key(key(KeyCode::Char('s'))).await.unwrap();
    assert_eq!(app.sort_label(), "Oldest");
    app.handle_key(key(KeyCode::Char('s'))).await.unwrap();
    assert_eq!(app.controller.state().contacts[0].name, "Ann");
  }
}
