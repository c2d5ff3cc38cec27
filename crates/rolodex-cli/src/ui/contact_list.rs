//! Contact list pane (left).

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{
  app::{App, Mode},
  controller::ContactsBackend,
};

/// Render the current page of contacts into `area`.
pub fn draw<B: ContactsBackend>(f: &mut Frame, area: Rect, app: &App<B>) {
  let state = app.controller.state();
  let query = app.controller.query();

  let title = format!(
    " Contacts ({})  page {}/{}  {} ",
    state.meta.total,
    state.meta.page,
    state.meta.page_count(),
    app.sort_label(),
  );

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Search bar along the bottom edge while editing or while a search applies.
  let searching = app.mode == Mode::Search;
  if (searching || !query.search.is_empty()) && inner_area.height > 2 {
    let search_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let search_text = if searching {
      format!("/{}_", app.search_input)
    } else {
      format!("/{}", query.search)
    };
    f.render_widget(
      Paragraph::new(search_text).style(Style::default().fg(Color::Yellow)),
      search_area,
    );
  }

  if let Some(error) = &state.error {
    f.render_widget(
      Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
      inner_area,
    );
    return;
  }

  if state.contacts.is_empty() {
    let text = if state.loading {
      "Loading…"
    } else if query.search.is_empty() {
      "No contacts yet."
    } else {
      "No contacts match your search."
    };
    f.render_widget(
      Paragraph::new(text).style(Style::default().fg(Color::DarkGray)),
      inner_area,
    );
    return;
  }

  let items: Vec<ListItem> = state
    .contacts
    .iter()
    .map(|contact| {
      let star = if contact.favorite { "★ " } else { "  " };
      ListItem::new(Line::from(vec![
        Span::styled(star, Style::default().fg(Color::Yellow)),
        Span::raw(contact.name.clone()),
        Span::styled(
          format!("  {} · {}", contact.email, contact.phone),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();

  let mut list_state = ListState::default();
  list_state.select(Some(app.cursor));

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut list_state,
  );
}
