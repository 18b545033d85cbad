use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use kn_core::Level;

use crate::tui::app::{App, LEVEL_ROWS};

fn level_row(level: Level) -> &'static str {
    match level {
        Level::Lower => "lower division (1–99)",
        Level::Upper => "upper division (100–199)",
        Level::Graduate => "graduate (200+)",
    }
}

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let filter = app.explorer.filter_state();

    let mut items: Vec<ListItem> = Vec::new();
    for level in LEVEL_ROWS {
        let mark = if filter.levels().contains(&level) {
            "[x]"
        } else {
            "[ ]"
        };
        items.push(ListItem::new(format!("{mark} {}", level_row(level))));
    }
    for (department, count) in &app.departments {
        let mark = if filter.departments().contains(&department.to_lowercase()) {
            "[x]"
        } else {
            "[ ]"
        };
        items.push(ListItem::new(format!("{mark} {department} ({count})")));
    }

    let title = if filter.is_unrestricted() {
        " Filters (showing all) ".to_string()
    } else {
        format!(
            " Filters ({} visible) ",
            app.explorer.view().course_count()
        )
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .bold(),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    state.select(Some(app.filter_cursor));

    frame.render_stateful_widget(list, area, &mut state);
}
