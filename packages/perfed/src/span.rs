//! Scoped timer measurement.

use crate::Timer;

/// A span of code measured by a [`Timer`] between creation and drop.
///
/// Creating the span starts the timer (unless it was already started) and dropping the span
/// stops it. Because the stop happens in [`Drop`], it also runs when the scope is left by
/// `?`, `return` or a panic.
///
/// # Examples
///
/// ```
/// use perfed::{TimeUnit, TimerCollection};
///
/// let mut timers = TimerCollection::new("startup");
/// {
///     let _span = timers.measure("read_config").unwrap();
///     // Work being measured.
/// } // The timer is stopped here.
///
/// let timer = timers.get_timer("read_config").unwrap();
/// assert!(timer.elapsed(TimeUnit::Seconds).unwrap() >= 0.0);
/// ```
#[derive(Debug)]
#[must_use = "Measurements are taken between creation and drop"]
pub struct TimerSpan {
    timer: Timer,
}

impl TimerSpan {
    pub(crate) fn new(timer: Timer) -> Self {
        timer.start();
        Self { timer }
    }

    /// The timer this span measures.
    #[must_use]
    pub fn timer(&self) -> &Timer {
        &self.timer
    }
}

impl Drop for TimerSpan {
    fn drop(&mut self) {
        self.timer
            .stop()
            .expect("a span starts its timer on creation, so stopping cannot fail");
    }
}
