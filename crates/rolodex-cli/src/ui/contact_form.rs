//! Add-contact form pane.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use crate::form::{ContactForm, FIELDS};

pub fn draw(f: &mut Frame, area: Rect, form: &ContactForm) {
  let validation = form.validate();

  let block = Block::default()
    .title(" Add contact ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));

  let mut lines = Vec::new();
  for spec in &FIELDS {
    let focused = form.focused() == spec.field;
    let value = form.value(spec.field);

    let label_style = if focused {
      Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(Span::styled(spec.label, label_style)));

    let input = match (value.is_empty(), focused) {
      (true, true) => Span::styled(
        format!("{}_", spec.placeholder),
        Style::default().fg(Color::DarkGray),
      ),
      (true, false) => Span::styled(spec.placeholder, Style::default().fg(Color::DarkGray)),
      (false, true) => Span::raw(format!("{value}_")),
      (false, false) => Span::raw(value.to_owned()),
    };
    lines.push(Line::from(vec![Span::raw("  "), input]));

    if let Some(message) = validation.errors.get(&spec.field) {
      lines.push(Line::from(Span::styled(
        format!("  {message}"),
        Style::default().fg(Color::Red),
      )));
    }
    lines.push(Line::default());
  }

  let submit_style = if validation.submittable {
    Style::default()
      .fg(Color::Green)
      .add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  lines.push(Line::from(Span::styled("[Enter] Add Contact", submit_style)));

  f.render_widget(Paragraph::new(lines).block(block), area);
}
