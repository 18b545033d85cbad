use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::tui::app::App;

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let items: Vec<ListItem> = app
        .explorer
        .results()
        .iter()
        .map(|result| {
            let line = Line::from(vec![
                Span::styled(
                    result.label.clone(),
                    Style::default().fg(Color::White).bold(),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("{:.3}", result.score),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let title = if app.explorer.query().is_empty() {
        " Results ".to_string()
    } else {
        format!(" Results ({}) ", app.explorer.results().len())
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .bold(),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !app.explorer.results().is_empty() {
        state.select(Some(app.results_cursor));
    }

    frame.render_stateful_widget(list, area, &mut state);
}
