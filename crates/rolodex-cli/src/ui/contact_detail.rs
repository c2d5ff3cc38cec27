//! Contact detail pane (right).

use chrono::Local;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};
use rolodex_core::contact::Contact;

/// Render every field of `contact` into `area`.
pub fn draw(f: &mut Frame, area: Rect, contact: &Contact) {
  let block = Block::default()
    .title(format!(" {} ", contact.name))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));

  let tags = if contact.tags.is_empty() {
    "—".to_string()
  } else {
    contact.tags.join(", ")
  };
  let message = if contact.message.is_empty() {
    "—"
  } else {
    contact.message.as_str()
  };
  let created = contact
    .created_at
    .with_timezone(&Local)
    .format("%Y-%m-%d %H:%M")
    .to_string();

  let mut lines = vec![
    field_line("Email", &contact.email),
    field_line("Phone", &contact.phone),
    field_line("Tags", &tags),
    field_line("Favorite", if contact.favorite { "yes" } else { "no" }),
    field_line("Created", &created),
    Line::default(),
    Line::from(Span::styled(
      "Message",
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD),
    )),
  ];
  lines.extend(message.lines().map(|l| Line::from(l.to_owned())));

  f.render_widget(
    Paragraph::new(lines)
      .block(block)
      .wrap(Wrap { trim: false }),
    area,
  );
}

fn field_line(label: &str, value: &str) -> Line<'static> {
  Line::from(vec![
    Span::styled(format!("{label:<10}"), Style::default().fg(Color::DarkGray)),
    Span::raw(value.to_owned()),
  ])
}
