//! TUI rendering: lays out and draws every pane.

pub mod contact_detail;
pub mod contact_form;
pub mod contact_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Alignment, Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::{
  app::{App, Mode},
  controller::{ContactsBackend, Notice},
};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<B: ContactsBackend>(f: &mut Frame, app: &App<B>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<B: ContactsBackend>(f: &mut Frame, area: Rect, app: &App<B>) {
  let bar = Style::default().bg(Color::DarkGray);
  f.render_widget(Block::default().style(bar), area);

  let [left, right] = Layout::horizontal([Constraint::Min(0), Constraint::Length(24)]).areas(area);

  let mut title = vec![Span::styled(
    " rolodex",
    bar.fg(Color::White).add_modifier(Modifier::BOLD),
  )];
  let search = &app.controller.query().search;
  if !search.is_empty() {
    title.push(Span::styled(format!("  matching \"{search}\""), bar.fg(Color::Yellow)));
  }
  let title = Line::from(title);
  f.render_widget(Paragraph::new(title), left);

  let stamp = if app.controller.state().loading {
    "loading… ".to_owned()
  } else {
    format!("{} ", Local::now().format("%Y-%m-%d %H:%M"))
  };
  f.render_widget(
    Paragraph::new(stamp)
      .alignment(Alignment::Right)
      .style(bar.fg(Color::Gray)),
    right,
  );
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<B: ContactsBackend>(f: &mut Frame, area: Rect, app: &App<B>) {
  let [list, side] =
    Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).areas(area);

  contact_list::draw(f, list, app);

  match (&app.mode, app.cursor_contact()) {
    (Mode::Form, _) => contact_form::draw(f, side, &app.form),
    (_, Some(contact)) => contact_detail::draw(f, side, contact),
    (_, None) => draw_empty_detail(f, side),
  }
}

fn draw_empty_detail(f: &mut Frame, area: Rect) {
  let block = Block::default()
    .title(" Detail ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new(Line::from(vec![Span::styled(
      "No contact selected. Press [a] to add one.",
      Style::default().fg(Color::DarkGray),
    )])),
    inner,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<B: ContactsBackend>(f: &mut Frame, area: Rect, app: &App<B>) {
  let (mode_label, hints) = match app.mode {
    Mode::Browse => (
      "NORMAL",
      "jk move  np page  / search  s sort  a add  f fav  d delete  x export  q quit",
    ),
    Mode::Search => ("SEARCH", "Type to search  Enter apply  Esc cancel"),
    Mode::Form => ("ADD", "Tab/S-Tab field  Enter save  Esc cancel"),
    Mode::ConfirmDelete => ("DELETE", "Delete this contact? y confirm  any other key cancels"),
  };

  let (text, color) = match app.controller.notice() {
    Some(Notice::Info(msg)) => (msg.clone(), Color::Green),
    Some(Notice::Error(msg)) => (msg.clone(), Color::Red),
    None => (hints.to_string(), Color::DarkGray),
  };

  let badge = match app.mode {
    Mode::ConfirmDelete => Color::Red,
    Mode::Form => Color::Green,
    _ => Color::Cyan,
  };
  let line = Line::from(vec![
    Span::styled(
      format!(" {mode_label} "),
      Style::default()
        .fg(Color::Black)
        .bg(badge)
        .add_modifier(Modifier::BOLD),
    ),
    Span::styled(format!("  {text}"), Style::default().fg(color)),
  ]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
