pub mod detail;
pub mod filters;
pub mod results;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::app::{ActivePane, App, InputMode};

pub fn draw(frame: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_search_bar(frame, app, outer[0]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(outer[1]);

    match app.active_pane {
        ActivePane::Results => results::draw(frame, app, panes[0]),
        ActivePane::Filters => filters::draw(frame, app, panes[0]),
    }
    detail::draw(frame, app, panes[1]);

    draw_status_bar(frame, app, outer[2]);

    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, border) = match app.input_mode {
        InputMode::Search => (format!("{}▏", app.explorer.query()), Color::Yellow),
        InputMode::Normal => (app.explorer.query().to_string(), Color::Blue),
    };

    let bar = Paragraph::new(text).block(
        Block::default()
            .title(" Search (/) ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(bar, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = match app.input_mode {
        InputMode::Search => {
            format!(
                "/{} (Enter to confirm, Esc to clear)",
                app.explorer.query()
            )
        }
        InputMode::Normal => {
            let hint = "j/k:navigate Enter:select Tab:filters 1/2/3:levels /:search Esc:clear ?:help q:quit";
            if app.status.is_empty() {
                format!(
                    "{} of {} courses visible | {hint}",
                    app.explorer.view().course_count(),
                    app.graph.course_count()
                )
            } else {
                format!("{} | {hint}", app.status)
            }
        }
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(bar, area);
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("  j / ↓       Move down"),
        Line::from("  k / ↑       Move up"),
        Line::from("  Enter       Select result / follow link / toggle filter"),
        Line::from("  /           Edit the search query"),
        Line::from("  Tab         Switch between results and filters"),
        Line::from("  1 / 2 / 3   Toggle lower / upper / graduate"),
        Line::from("  Esc         Clear search and selection"),
        Line::from("  ?           Toggle this help"),
        Line::from("  q           Quit"),
        Line::from("  Ctrl+C      Force quit"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
