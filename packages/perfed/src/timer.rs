//! Single named interval measurement.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::pal::{Platform, PlatformFacade};
use crate::{Error, Result, TimeUnit, TimerSpan};

/// Lifecycle state of a [`Timer`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TimerState {
    /// Created but not yet started. Elapsed time cannot be read.
    Unstarted,

    /// Started; elapsed time is read from the live clock.
    Running,

    /// Started and stopped; elapsed time is fixed.
    Stopped,
}

/// Measures the wall-clock time of one named interval.
///
/// A timer starts out [`Unstarted`](TimerState::Unstarted). The first call to
/// [`start()`](Self::start) records the start timestamp and the first call to
/// [`stop()`](Self::stop) records the stop timestamp; repeated calls are ignored.
///
/// `Timer` is a handle: clones share the same timestamps, which is how a
/// [`TimerCollection`](crate::TimerCollection) hands out timers that the caller may
/// continue to start, stop and read.
///
/// # Examples
///
/// ```
/// use perfed::{TimeUnit, Timer};
///
/// let timer = Timer::new("load");
/// timer.start();
/// // Do the work being measured.
/// timer.stop().unwrap();
///
/// let seconds = timer.elapsed(TimeUnit::Seconds).unwrap();
/// assert!(seconds >= 0.0);
/// ```
#[derive(Clone)]
pub struct Timer {
    inner: Rc<TimerInner>,
}

struct TimerInner {
    name: String,
    platform: PlatformFacade,
    start: Cell<Option<u64>>,
    stop: Cell<Option<u64>>,
}

impl Timer {
    /// Creates an unstarted timer that reads the operating system monotonic clock.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_platform(name, PlatformFacade::real())
    }

    pub(crate) fn with_platform(name: impl Into<String>, platform: PlatformFacade) -> Self {
        Self {
            inner: Rc::new(TimerInner {
                name: name.into(),
                platform,
                start: Cell::new(None),
                stop: Cell::new(None),
            }),
        }
    }

    /// The name of the timer.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// The current lifecycle state.
    #[must_use]
    pub fn state(&self) -> TimerState {
        match (self.inner.start.get(), self.inner.stop.get()) {
            (None, _) => TimerState::Unstarted,
            (Some(_), None) => TimerState::Running,
            (Some(_), Some(_)) => TimerState::Stopped,
        }
    }

    /// Starts the timer. Has no effect if the timer was already started.
    pub fn start(&self) {
        if self.inner.start.get().is_none() {
            self.inner.start.set(Some(self.inner.platform.now_nanos()));
        }
    }

    /// Stops the timer. Has no effect if the timer was already stopped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalState`] if the timer has not been started.
    pub fn stop(&self) -> Result<()> {
        if self.inner.start.get().is_none() {
            return Err(self.not_started());
        }

        if self.inner.stop.get().is_none() {
            self.inner.stop.set(Some(self.inner.platform.now_nanos()));
        }

        Ok(())
    }

    /// Returns the elapsed time in nanoseconds.
    ///
    /// A running timer is read against the current clock, so successive calls return
    /// non-decreasing values. A stopped timer always returns the same value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalState`] if the timer has not been started.
    pub fn elapsed_nanos(&self) -> Result<u64> {
        let start = self.inner.start.get().ok_or_else(|| self.not_started())?;
        let end = self
            .inner
            .stop
            .get()
            .unwrap_or_else(|| self.inner.platform.now_nanos());

        Ok(end.saturating_sub(start))
    }

    /// Returns the elapsed time converted to `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalState`] if the timer has not been started.
    pub fn elapsed(&self, unit: TimeUnit) -> Result<f64> {
        Ok(unit.convert(nanos_as_f64(self.elapsed_nanos()?)))
    }

    /// Starts the timer and returns a span that stops it when dropped.
    ///
    /// The timer is stopped on every exit path from the scope holding the span, including
    /// unwinding from a panic.
    ///
    /// # Examples
    ///
    /// ```
    /// use perfed::{TimerState, Timer};
    ///
    /// let timer = Timer::new("scoped");
    /// {
    ///     let _span = timer.measure();
    ///     assert_eq!(timer.state(), TimerState::Running);
    /// }
    /// assert_eq!(timer.state(), TimerState::Stopped);
    /// ```
    pub fn measure(&self) -> TimerSpan {
        TimerSpan::new(self.clone())
    }

    /// Runs `f` inside a span of this timer and returns its result.
    pub fn time<R>(&self, f: impl FnOnce() -> R) -> R {
        let _span = self.measure();
        f()
    }

    /// Elapsed nanoseconds of a timer that is known to have been started.
    pub(crate) fn started_elapsed_nanos(&self) -> u64 {
        self.elapsed_nanos()
            .expect("timers held by a collection are started when inserted")
    }

    fn not_started(&self) -> Error {
        Error::IllegalState {
            name: self.inner.name.clone(),
        }
    }
}

impl fmt::Debug for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timer")
            .field("name", &self.inner.name)
            .field("start", &self.inner.start.get())
            .field("stop", &self.inner.stop.get())
            .finish_non_exhaustive()
    }
}

/// Converts a nanosecond count for unit conversion.
#[expect(
    clippy::cast_precision_loss,
    reason = "durations below 2^53 ns (104 days) convert exactly, longer ones lose sub-ns digits"
)]
pub(crate) fn nanos_as_f64(nanos: u64) -> f64 {
    nanos as f64
}
