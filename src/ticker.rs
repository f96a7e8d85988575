//! Cancellable repeating timer.
//!
//! A [`Ticker`] owns a background thread that sends a tick every `period`
//! over a bounded channel of capacity one. The thread never touches the
//! grids: the owner of the [`crate::Session`] drains ticks on its own thread
//! and calls `evolve` for each one, so steps never overlap. Ticks the owner
//! is too slow to consume are coalesced.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use tracing::trace;

use crate::error::{LifeError, LifeResult};

/// Handle to a running repeating timer. Dropping it cancels the timer.
#[derive(Debug)]
pub struct Ticker {
    period: Duration,
    ticks: Receiver<()>,
    cancel_tx: Option<Sender<()>>,
    join: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Starts a timer that ticks every `period`.
    ///
    /// # Errors
    ///
    /// [`LifeError::InvalidTimerDelay`] for a zero period, or
    /// [`LifeError::Timer`] if the timer thread cannot be spawned.
    pub fn spawn(period: Duration) -> LifeResult<Ticker> {
        if period.is_zero() {
            return Err(LifeError::InvalidTimerDelay);
        }
        let (tick_tx, ticks) = bounded::<()>(1);
        let (cancel_tx, cancel_rx) = bounded::<()>(1);

        let join = thread::Builder::new()
            .name("conway-ticker".to_string())
            .spawn(move || timer_loop(period, tick_tx, cancel_rx))
            .map_err(|err| LifeError::Timer(err.to_string()))?;

        Ok(Ticker {
            period,
            ticks,
            cancel_tx: Some(cancel_tx),
            join: Some(join),
        })
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Consumes a pending tick without blocking.
    pub fn try_tick(&self) -> bool {
        self.ticks.try_recv().is_ok()
    }

    /// Waits up to `timeout` for the next tick.
    pub fn wait_tick(&self, timeout: Duration) -> bool {
        self.ticks.recv_timeout(timeout).is_ok()
    }

    /// Replaces this timer with one ticking every `period`.
    ///
    /// The new thread is spawned first. Only once it is running is the old
    /// timer stopped and its pending tick discarded, so on error `self`
    /// keeps ticking at its old period.
    ///
    /// # Errors
    ///
    /// [`LifeError::InvalidTimerDelay`] for a zero period, or
    /// [`LifeError::Timer`] if the thread could not be spawned.
    pub fn restart(&mut self, period: Duration) -> LifeResult<()> {
        let fresh = Ticker::spawn(period)?;
        self.shutdown();
        *self = fresh;
        Ok(())
    }

    /// Stops the timer. No tick is delivered afterwards.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.try_send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
        while self.ticks.try_recv().is_ok() {}
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn timer_loop(period: Duration, tick_tx: Sender<()>, cancel_rx: Receiver<()>) {
    loop {
        match cancel_rx.recv_timeout(period) {
            Err(RecvTimeoutError::Timeout) => match tick_tx.try_send(()) {
                Ok(()) => {}
                Err(TrySendError::Full(())) => trace!("tick coalesced"),
                Err(TrySendError::Disconnected(())) => break,
            },
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
