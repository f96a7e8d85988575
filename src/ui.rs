//! Terminal rendering.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use sysinfo::SystemExt;

use conway_tui::SessionState;

use crate::app::{App, ALIVE_GLYPH, DEAD_GLYPH};

/// Draws the whole screen: grid on the left, statistics on the right.
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
        .split(f.size());

    draw_grid(f, app, chunks[0]);
    draw_stats(f, app, chunks[1]);
}

/// Title of the grid panel. The `r` key wipes the board while idle and
/// restores the baseline otherwise, so its label follows the state.
fn grid_title(state: SessionState) -> &'static str {
    match state {
        SessionState::Idle => {
            "Game of Life [Space: Start/Stop | Enter: Step | r: Clear | t/click: Toggle | q: Quit]"
        }
        SessionState::Running | SessionState::PausedEvolved => {
            "Game of Life [Space: Start/Stop | Enter: Step | r: Reset | t/click: Toggle | q: Quit]"
        }
    }
}

/// Draws the game grid and records where it landed for mouse hit testing.
///
/// # Arguments
///
/// * `f` - The frame to draw on
/// * `app` - The application state; its `grid_area` is updated
/// * `area` - The area of the terminal to draw in
fn draw_grid(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(grid_title(app.session.state()));
    app.grid_area = block.inner(area);

    let grid = app.session.current();
    let cursor_style = Style::default().bg(Color::DarkGray);
    let lines: Vec<Line> = (0..grid.rows())
        .map(|row| {
            let spans: Vec<Span> = (0..grid.columns())
                .map(|column| {
                    let alive = grid.get(row, column).map(|cell| cell.is_alive()).unwrap_or(false);
                    let text = if alive { ALIVE_GLYPH } else { DEAD_GLYPH };
                    if (row, column) == app.cursor {
                        Span::styled(text, cursor_style.fg(Color::Yellow))
                    } else if alive {
                        Span::styled(text, Style::default().fg(Color::Green))
                    } else {
                        Span::styled(text, Style::default().fg(Color::DarkGray))
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Draws the statistics panel.
fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let memory_used = app.sys.used_memory() / 1024; // Convert to KB
    let memory_total = app.sys.total_memory() / 1024;
    let stats = app.session.stats();
    let (rows, columns) = app.session.dimensions();
    let status = match app.session.state() {
        SessionState::Idle => "Idle",
        SessionState::Running => "Running",
        SessionState::PausedEvolved => "Paused",
    };

    let mut stats_text = format!(
        "Statistics:\n\
        Grid: {}x{}\n\
        Generation: {}\n\
        Current Population: {}\n\
        Cells Created: {}\n\
        Cells Destroyed: {}\n\
        Birth Rate: {:.2}/gen\n\
        Death Rate: {:.2}/gen\n\
        Memory Usage: {}KB/{:.2}MB\n\
        Status: {}\n\
        Delay: {}ms\n\
        Cursor: ({}, {})\n\
        \n\
        +/-: Speed | g: Random | arrows: Move\n",
        rows,
        columns,
        stats.generation,
        stats.current_population,
        stats.cells_created,
        stats.cells_destroyed,
        stats.birth_rate(),
        stats.death_rate(),
        memory_used,
        memory_total as f64 / 1024.0,
        status,
        app.session.timer_delay().as_millis(),
        app.cursor.0,
        app.cursor.1,
    );
    if let Some(message) = &app.status {
        stats_text.push_str(&format!("\nError: {message}\n"));
    }

    let stats_widget = Paragraph::new(stats_text)
        .block(Block::default().borders(Borders::ALL).title("Statistics"))
        .wrap(Wrap { trim: true });

    f.render_widget(stats_widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_key_label_follows_state() {
        assert!(grid_title(SessionState::Idle).contains("r: Clear"));
        assert!(grid_title(SessionState::Running).contains("r: Reset"));
        assert!(grid_title(SessionState::PausedEvolved).contains("r: Reset"));
    }
}
