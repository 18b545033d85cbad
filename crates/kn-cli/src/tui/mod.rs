mod app;
mod views;

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use kn_core::{CourseGraph, Level};

use app::{ActivePane, App, InputMode};

pub fn run(graph: CourseGraph) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let mut app = App::new(graph);

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|frame| views::draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if let Event::Key(key) = event::read().map_err(|e| format!("event error: {e}"))? {
            // Ctrl+C always quits
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Ok(());
            }

            match app.input_mode {
                InputMode::Normal => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Char('/') => app.start_search(),
                    KeyCode::Char('j') | KeyCode::Down => app.move_down(),
                    KeyCode::Char('k') | KeyCode::Up => app.move_up(),
                    KeyCode::Tab => app.next_pane(),
                    KeyCode::Char('1') => app.toggle_level(Level::Lower),
                    KeyCode::Char('2') => app.toggle_level(Level::Upper),
                    KeyCode::Char('3') => app.toggle_level(Level::Graduate),
                    KeyCode::Char('?') => app.toggle_help(),
                    KeyCode::Esc => app.clear(),
                    KeyCode::Enter => match app.active_pane {
                        ActivePane::Filters => app.toggle_filter_row(),
                        ActivePane::Results => {
                            if app.is_focused() {
                                app.select_link();
                            } else {
                                app.select_result();
                            }
                        }
                    },
                    _ => {}
                },
                InputMode::Search => match key.code {
                    KeyCode::Esc => app.cancel_search(),
                    KeyCode::Enter => app.confirm_search(),
                    KeyCode::Backspace => app.search_backspace(),
                    KeyCode::Char(c) => app.search_push(c),
                    _ => {}
                },
            }
        }
    }
}
