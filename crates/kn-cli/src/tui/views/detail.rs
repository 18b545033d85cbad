use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};

use kn_core::Level;
use kn_engine::{Mode, RatingSlot};

use crate::tui::app::App;

pub fn draw(frame: &mut Frame, app: &mut App, area: Rect) {
    let Mode::Focused(course_id) = app.explorer.mode().clone() else {
        let hint = Paragraph::new("Select a course to see its rating and links.")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title(" Course ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(hint, area);
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(0)])
        .split(area);

    // Course info + rating
    let mut lines: Vec<Line> = Vec::new();
    if let Some(course) = app.graph.course(&course_id) {
        lines.push(Line::from(Span::styled(
            course.search_label(),
            Style::default().fg(Color::White).bold(),
        )));
        let mut meta = format!("department: {}", course.department());
        if let Some(level) = Level::of(&course.id) {
            meta.push_str(&format!("  level: {level}"));
        }
        if let Some(units) = course.units {
            meta.push_str(&format!("  units: {units}"));
        }
        lines.push(Line::from(Span::styled(
            meta,
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    match app.explorer.rating() {
        RatingSlot::Ready(rating) => {
            lines.push(Line::from(format!("overall:     {:.1} / 5", rating.overall)));
            lines.push(Line::from(format!("difficulty:  {:.1} / 5", rating.difficulty)));
            lines.push(Line::from(format!("workload:    {:.1} / 5", rating.workload)));
            lines.push(Line::from(format!("usefulness:  {:.1} / 5", rating.usefulness)));
            lines.push(Line::from(Span::styled(
                format!("{} reviews, {} comments", rating.review_count, rating.comment_count),
                Style::default().fg(Color::DarkGray),
            )));
        }
        RatingSlot::Pending { .. } => {
            lines.push(Line::from(Span::styled(
                "fetching rating…",
                Style::default().fg(Color::DarkGray),
            )));
        }
        RatingSlot::Unavailable => {
            lines.push(Line::from(Span::styled(
                "ratings unavailable",
                Style::default().fg(Color::Red),
            )));
        }
        RatingSlot::Empty => {}
    }

    let info = Paragraph::new(lines).block(
        Block::default()
            .title(" Course ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(info, sections[0]);

    // Prerequisite / postrequisite links, selectable
    let links = app.focused_links();
    let items: Vec<ListItem> = links
        .iter()
        .map(|link| {
            let (marker, color) = if link.prerequisite {
                ("◀ requires ", Color::Blue)
            } else {
                ("▶ leads to ", Color::Green)
            };
            ListItem::new(Line::from(vec![
                Span::styled(marker, Style::default().fg(color)),
                Span::raw(link.label.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Links (Enter to follow) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .bold(),
        )
        .highlight_symbol("▶ ");

    let mut state = ListState::default();
    if !links.is_empty() {
        state.select(Some(app.link_cursor));
    }

    frame.render_stateful_widget(list, sections[1], &mut state);
}
