use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use conway_tui::{Cell, ChangeKind, Grid, LifeError, Session, SessionState, Strategy};

const TICK_WAIT: Duration = Duration::from_secs(2);

fn alive(session: &Session) -> Vec<(usize, usize)> {
    session.current().alive_cells().collect()
}

fn pattern(text: &str) -> Grid {
    text.parse().unwrap()
}

#[test]
fn blinker_scenario_on_five_by_five() {
    let mut session = Session::new(5, 5).unwrap();
    for column in 1..=3 {
        session.toggle_cell(2, column).unwrap();
    }

    session.step().unwrap();
    assert_eq!(alive(&session), vec![(1, 2), (2, 2), (3, 2)]);

    session.step().unwrap();
    assert_eq!(alive(&session), vec![(2, 1), (2, 2), (2, 3)]);
}

#[test]
fn pulsar_has_period_three() {
    let mut session = Session::new(40, 40).unwrap();
    session
        .load_pattern(&pattern(include_str!("../patterns/pulsar.txt")))
        .unwrap();
    let start = session.current().clone();
    assert_eq!(start.population(), 48);

    session.evolve().unwrap();
    assert_ne!(session.current(), &start);
    session.evolve().unwrap();
    session.evolve().unwrap();
    assert_eq!(session.current(), &start);
}

#[test]
fn glider_translates_diagonally() {
    let mut session = Session::new(40, 40).unwrap().with_strategy(Strategy::Parallel);
    session
        .load_pattern(&pattern(include_str!("../patterns/glider.txt")))
        .unwrap();
    let start = alive(&session);

    for _ in 0..4 {
        session.evolve().unwrap();
    }
    let moved: Vec<_> = start.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
    assert_eq!(alive(&session), moved);
    assert_eq!(session.stats().generation, 4);
    assert_eq!(session.stats().current_population, 5);
}

#[test]
fn idle_reset_wipes_manual_edits() {
    let mut session = Session::new(40, 40).unwrap();
    session.toggle_cell(0, 0).unwrap();
    session.toggle_cell(39, 39).unwrap();
    session.toggle_cell(20, 7).unwrap();
    assert_eq!(session.state(), SessionState::Idle);

    session.reset().unwrap();
    assert!(session.current().is_empty());
    assert!(session.saved().is_empty());
    assert!(session.next().is_empty());
}

#[test]
fn timer_driven_run_then_reset() {
    let mut session = Session::new(5, 5)
        .unwrap()
        .with_timer_delay(Duration::from_millis(5))
        .unwrap();
    for column in 1..=3 {
        session.toggle_cell(2, column).unwrap();
    }
    let start = session.current().clone();

    let ticker = session.start().unwrap();
    for _ in 0..3 {
        assert!(ticker.wait_tick(TICK_WAIT));
        session.evolve().unwrap();
    }
    assert_eq!(session.stats().generation, 3);
    // Odd generation count: the blinker is vertical.
    assert_eq!(alive(&session), vec![(1, 2), (2, 2), (3, 2)]);
    assert_eq!(session.saved(), &start);

    session.stop(ticker);
    assert_eq!(session.state(), SessionState::PausedEvolved);

    session.reset().unwrap();
    assert_eq!(session.current(), &start);
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn reset_while_running_restores_without_stopping() {
    let mut session = Session::new(5, 5)
        .unwrap()
        .with_timer_delay(Duration::from_millis(5))
        .unwrap();
    for column in 1..=3 {
        session.toggle_cell(2, column).unwrap();
    }
    let start = session.current().clone();

    let ticker = session.start().unwrap();
    assert!(ticker.wait_tick(TICK_WAIT));
    session.evolve().unwrap();

    session.reset().unwrap();
    assert_eq!(session.current(), &start);
    assert!(session.is_evolving());

    // The same timer keeps delivering ticks.
    assert!(ticker.wait_tick(TICK_WAIT));
    session.evolve().unwrap();
    assert_eq!(session.stats().generation, 1);
    session.stop(ticker);
}

#[test]
fn changing_delay_while_running_replaces_timer() {
    let mut session = Session::new(5, 5).unwrap();
    let mut ticker = session.start().unwrap();
    assert_eq!(ticker.period(), Duration::from_millis(1000));

    session
        .set_timer_delay(Duration::from_millis(5), Some(&mut ticker))
        .unwrap();
    assert_eq!(ticker.period(), Duration::from_millis(5));
    assert_eq!(session.timer_delay(), Duration::from_millis(5));
    assert!(session.is_evolving());
    assert!(ticker.wait_tick(TICK_WAIT));

    assert_eq!(
        session.set_timer_delay(Duration::ZERO, Some(&mut ticker)),
        Err(LifeError::InvalidTimerDelay)
    );
    assert_eq!(ticker.period(), Duration::from_millis(5));
    session.stop(ticker);
}

#[test]
fn edits_during_a_run_do_not_move_the_baseline() {
    let mut session = Session::new(6, 6).unwrap();
    let ticker = session.start().unwrap();
    session.toggle_cell(3, 3).unwrap();
    assert_eq!(session.read_cell(3, 3).unwrap(), Cell::Alive);
    assert!(session.saved().is_empty());
    session.stop(ticker);
}

#[test]
fn observer_tracks_board_for_redraw() {
    let mut session = Session::new(8, 8).unwrap();
    let mirror = Rc::new(RefCell::new(Grid::new(8, 8).unwrap()));
    let kinds = Rc::new(RefCell::new(Vec::new()));
    {
        let mirror = Rc::clone(&mirror);
        let kinds = Rc::clone(&kinds);
        session.subscribe(move |event| {
            kinds.borrow_mut().push(event.kind);
            let mut grid = mirror.borrow_mut();
            for &(row, column) in &event.changed {
                grid.toggle(row, column).unwrap();
            }
        });
    }

    session
        .load_pattern(&pattern(include_str!("../patterns/r_pentomino.txt")))
        .unwrap();
    for _ in 0..10 {
        session.evolve().unwrap();
        assert_eq!(&*mirror.borrow(), session.current());
    }
    session.toggle_cell(0, 0).unwrap();
    session.reset().unwrap();
    assert_eq!(&*mirror.borrow(), session.current());

    let kinds = kinds.borrow();
    assert_eq!(kinds.first(), Some(&ChangeKind::Load));
    assert_eq!(kinds.last(), Some(&ChangeKind::Restore));
    assert_eq!(kinds.len(), 13);
}
