//! Interactive application state: the session plus everything the terminal
//! front end needs around it (cursor, timer handle, random source, status).

use std::time::Duration;

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use rand::rngs::StdRng;
use ratatui::layout::Rect;
use sysinfo::{System, SystemExt};
use tracing::warn;

use conway_tui::{Coord, LifeResult, Session, Ticker};

/// Fastest and slowest delays reachable with `+` / `-`.
const MIN_DELAY: Duration = Duration::from_millis(10);
const MAX_DELAY: Duration = Duration::from_millis(10_000);

/// Glyphs for one cell; both are `CELL_WIDTH` terminal columns wide.
pub const ALIVE_GLYPH: &str = "██";
pub const DEAD_GLYPH: &str = "· ";
pub const CELL_WIDTH: u16 = 2;

/// Main application state container for the interactive front end.
#[derive(Debug)]
pub struct App {
    /// The simulation being edited and run
    pub session: Session,
    /// Timer of the current run; `None` while stopped
    pub ticker: Option<Ticker>,
    /// Cell edited by the keyboard
    pub cursor: Coord,
    /// Screen area the grid was last drawn into, for mouse hit testing
    pub grid_area: Rect,
    /// Live-cell probability used by the random fill key
    pub density: f64,
    /// Last error or notice, shown under the statistics
    pub status: Option<String>,
    /// System information for resource monitoring
    pub sys: System,
    rng: StdRng,
    quit: bool,
}

impl App {
    pub fn new(session: Session, rng: StdRng, density: f64) -> App {
        let (rows, columns) = session.dimensions();
        App {
            session,
            ticker: None,
            cursor: (rows / 2, columns / 2),
            grid_area: Rect::default(),
            density,
            status: None,
            sys: System::new_all(),
            rng,
            quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn report(&mut self, result: LifeResult<()>) {
        match result {
            Ok(()) => self.status = None,
            Err(err) => {
                warn!(error = %err, "operation rejected");
                self.status = Some(err.to_string());
            }
        }
    }

    /// Handles one key press.
    ///
    /// # Controls
    ///
    /// * Space: start/stop
    /// * Enter: evolve one generation
    /// * r: reset (restore the baseline, or clear an unevolved board)
    /// * arrows: move the cursor; t: toggle the cell under it
    /// * + / -: faster / slower
    /// * g: random fill
    /// * q: quit
    pub fn handle_key(&mut self, code: KeyCode) {
        let result = match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit = true;
                Ok(())
            }
            KeyCode::Char(' ') => self.session.toggle_running(&mut self.ticker),
            KeyCode::Enter => self.session.evolve().map(|_| ()),
            KeyCode::Char('r') => self.session.reset(),
            KeyCode::Char('t') => {
                let (row, column) = self.cursor;
                self.session.toggle_cell(row, column).map(|_| ())
            }
            KeyCode::Char('g') => self.session.randomize(&mut self.rng, self.density),
            KeyCode::Char('+') | KeyCode::Char('=') => self.scale_delay(0.5),
            KeyCode::Char('-') => self.scale_delay(2.0),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            _ => return,
        };
        self.report(result);
    }

    /// Left click toggles the clicked cell.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some((row, column)) = self.cell_at(mouse.column, mouse.row) {
            self.cursor = (row, column);
            let result = self.session.toggle_cell(row, column).map(|_| ());
            self.report(result);
        }
    }

    /// Maps a terminal position to the grid cell drawn there.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<Coord> {
        let area = self.grid_area;
        if x < area.x || y < area.y || x >= area.x + area.width || y >= area.y + area.height {
            return None;
        }
        let row = (y - area.y) as usize;
        let column = ((x - area.x) / CELL_WIDTH) as usize;
        self.session.current().contains(row, column).then_some((row, column))
    }

    fn move_cursor(&mut self, d_row: isize, d_column: isize) -> LifeResult<()> {
        let (rows, columns) = self.session.dimensions();
        let (row, column) = self.cursor;
        let row = row.saturating_add_signed(d_row).min(rows - 1);
        let column = column.saturating_add_signed(d_column).min(columns - 1);
        self.cursor = (row, column);
        Ok(())
    }

    fn scale_delay(&mut self, factor: f64) -> LifeResult<()> {
        let delay = self
            .session
            .timer_delay()
            .mul_f64(factor)
            .clamp(MIN_DELAY, MAX_DELAY);
        self.session.set_timer_delay(delay, self.ticker.as_mut())
    }

    /// Runs one evolve for each tick the timer has delivered since the last
    /// frame.
    pub fn on_frame(&mut self) {
        let mut result = Ok(());
        if let Some(ticker) = &self.ticker {
            while result.is_ok() && ticker.try_tick() {
                result = self.session.evolve().map(|_| ());
            }
        }
        if result.is_err() {
            self.report(result);
        }
        self.sys.refresh_memory();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn app() -> App {
        let session = Session::new(10, 10).unwrap();
        App::new(session, StdRng::seed_from_u64(1), 0.5)
    }

    #[test]
    fn cursor_stays_on_board() {
        let mut app = app();
        assert_eq!(app.cursor, (5, 5));
        for _ in 0..20 {
            app.handle_key(KeyCode::Up);
            app.handle_key(KeyCode::Right);
        }
        assert_eq!(app.cursor, (0, 9));
        app.handle_key(KeyCode::Char('t'));
        assert!(app.session.read_cell(0, 9).unwrap().is_alive());
    }

    #[test]
    fn clicks_map_to_cells() {
        let mut app = app();
        app.grid_area = Rect::new(1, 1, 20, 10);
        assert_eq!(app.cell_at(1, 1), Some((0, 0)));
        assert_eq!(app.cell_at(4, 3), Some((2, 1)));
        assert_eq!(app.cell_at(0, 1), None);
        assert_eq!(app.cell_at(21, 1), None);

        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 3,
            modifiers: crossterm::event::KeyModifiers::NONE,
        });
        assert!(app.session.read_cell(2, 1).unwrap().is_alive());
        assert_eq!(app.cursor, (2, 1));
    }

    #[test]
    fn delay_keys_scale_within_bounds() {
        let mut app = app();
        app.handle_key(KeyCode::Char('+'));
        assert_eq!(app.session.timer_delay(), Duration::from_millis(500));
        for _ in 0..20 {
            app.handle_key(KeyCode::Char('-'));
        }
        assert_eq!(app.session.timer_delay(), MAX_DELAY);
    }

    #[test]
    fn space_starts_and_stops() {
        let mut app = app();
        app.handle_key(KeyCode::Char(' '));
        assert!(app.session.is_evolving());
        assert!(app.ticker.is_some());
        app.handle_key(KeyCode::Char(' '));
        assert!(!app.session.is_evolving());
        assert!(app.ticker.is_none());
        assert!(app.status.is_none());
    }
}
