//! Named groups of timers with aggregation, rendering and export.

use std::collections::HashMap;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::slice;

use crate::export::format_duration;
use crate::pal::{Filesystem, FilesystemFacade, PlatformFacade};
use crate::timer::nanos_as_f64;
use crate::{
    Alignment, Error, ExportFormat, Result, Summary, Table, TimeUnit, Timer, TimerSpan, WriteMode,
};

/// A named group of [`Timer`]s that can be aggregated and exported together.
///
/// Timers are kept in the order they were started; every export lists them in that order.
/// Timer names are unique within a collection: starting a name that is already present is
/// rejected with [`Error::AlreadyExists`] and leaves the existing timer untouched.
///
/// Timers that are still running when a collection is read are read live against the clock.
///
/// # Examples
///
/// ```
/// use perfed::{TimeUnit, TimerCollection};
///
/// let mut timers = TimerCollection::new("pipeline");
///
/// timers.start_timer("parse").unwrap();
/// // Parse something.
/// timers.stop_timer("parse").unwrap();
///
/// timers.start_timer("render").unwrap();
/// // Render something.
/// timers.stop_timer("render").unwrap();
///
/// assert_eq!(timers.len(), 2);
/// timers.print_to_stdout(TimeUnit::Milliseconds);
/// ```
#[derive(Debug)]
pub struct TimerCollection {
    name: String,
    timers: Vec<Timer>,
    index: HashMap<String, usize>,
    platform: PlatformFacade,
    filesystem: FilesystemFacade,
}

impl TimerCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_pal(name, PlatformFacade::real(), FilesystemFacade::target())
    }

    pub(crate) fn with_pal(
        name: impl Into<String>,
        platform: PlatformFacade,
        filesystem: FilesystemFacade,
    ) -> Self {
        Self {
            name: name.into(),
            timers: Vec::new(),
            index: HashMap::new(),
            platform,
            filesystem,
        }
    }

    /// The name of the collection.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates a timer named `name`, starts it and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if the collection already holds a timer named `name`.
    pub fn start_timer(&mut self, name: impl Into<String>) -> Result<&Timer> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(Error::AlreadyExists { kind: "timer", name });
        }

        let timer = Timer::with_platform(name.clone(), self.platform.clone());
        timer.start();

        self.index.insert(name, self.timers.len());
        self.timers.push(timer);

        Ok(self
            .timers
            .last()
            .expect("we just pushed a timer so the collection is not empty"))
    }

    /// Stops the timer named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the collection holds no timer named `name`.
    pub fn stop_timer(&self, name: &str) -> Result<()> {
        self.get_timer(name)?.stop()
    }

    /// Returns the timer named `name`.
    ///
    /// The returned handle shares state with the collection; starting, stopping or reading it
    /// is the same as doing so through the collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if the collection holds no timer named `name`.
    pub fn get_timer(&self, name: &str) -> Result<&Timer> {
        self.index
            .get(name)
            .and_then(|&position| self.timers.get(position))
            .ok_or_else(|| Error::NotFound {
                kind: "timer",
                name: name.to_string(),
            })
    }

    /// Starts a timer named `name` and returns a span that stops it when dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if the collection already holds a timer named `name`.
    pub fn measure(&mut self, name: impl Into<String>) -> Result<TimerSpan> {
        Ok(self.start_timer(name)?.measure())
    }

    /// The number of timers in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether the collection holds no timers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// The timers in the order they were started.
    pub fn iter(&self) -> impl Iterator<Item = &Timer> {
        self.timers.iter()
    }

    /// The name and elapsed time of every timer, in the order they were started.
    #[must_use]
    pub fn to_pairs(&self, unit: TimeUnit) -> Vec<(String, f64)> {
        self.timers
            .iter()
            .map(|timer| {
                (
                    timer.name().to_string(),
                    unit.convert(nanos_as_f64(timer.started_elapsed_nanos())),
                )
            })
            .collect()
    }

    /// The elapsed time of every timer, keyed by timer name.
    ///
    /// The map has no order; use [`to_pairs()`](Self::to_pairs) to get the timers in the order
    /// they were started.
    #[must_use]
    pub fn to_map(&self, unit: TimeUnit) -> HashMap<String, f64> {
        self.to_pairs(unit).into_iter().collect()
    }

    /// The `Timer`/`Duration` table of the collection.
    #[must_use]
    pub fn to_table(&self, unit: TimeUnit) -> Table {
        let mut table = Table::new([("Timer", Alignment::Left), ("Duration", Alignment::Right)]);

        for (name, duration) in self.to_pairs(unit) {
            table.push_row([name, format_duration(duration)]);
        }

        table
    }

    /// Calculates the average, maximum and minimum elapsed time of the timers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the collection holds no timers.
    pub fn summary(&self, unit: TimeUnit) -> Result<Summary> {
        let readings: Vec<u64> = self
            .timers
            .iter()
            .map(Timer::started_elapsed_nanos)
            .collect();

        Summary::from_nanos(&readings, unit).ok_or_else(|| Error::EmptyCollection {
            name: self.name.clone(),
        })
    }

    /// Calculates the average elapsed time of the timers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the collection holds no timers.
    pub fn average(&self, unit: TimeUnit) -> Result<f64> {
        Ok(self.summary(unit)?.average())
    }

    /// Writes the `Timer`/`Duration` table to `sink`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `sink` fails.
    pub fn render(&self, unit: TimeUnit, sink: &mut impl Write) -> io::Result<()> {
        write!(sink, "{}", self.to_table(unit))
    }

    /// Writes the `Stat`/`Value` table of [`summary()`](Self::summary) to `sink`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyCollection`] if the collection holds no timers, or
    /// [`Error::Io`] if writing to `sink` fails.
    pub fn render_summary(&self, unit: TimeUnit, sink: &mut impl Write) -> Result<()> {
        write!(sink, "{}", self.summary(unit)?)?;
        Ok(())
    }

    /// Writes the timers to `sink` as CSV with a `Timer,Duration` header row.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `sink` fails.
    pub fn render_csv(&self, unit: TimeUnit, sink: &mut impl Write) -> io::Result<()> {
        writeln!(sink, "Timer,Duration")?;

        for (name, duration) in self.to_pairs(unit) {
            writeln!(sink, "{name},{}", format_duration(duration))?;
        }

        Ok(())
    }

    /// Prints the `Timer`/`Duration` table to stdout.
    #[cfg_attr(test, mutants::skip)] // Too difficult to test stdout output reliably - manually tested.
    pub fn print_to_stdout(&self, unit: TimeUnit) {
        print!("{}", self.to_table(unit));
    }

    /// Writes the timers to the file at `path`.
    ///
    /// The whole file content is encoded first and then written in a single call, opening
    /// the file according to `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be opened in `mode` or written, for example
    /// because it already exists and `mode` is [`WriteMode::CreateExclusive`].
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use perfed::{ExportFormat, TimeUnit, TimerCollection, WriteMode};
    ///
    /// let mut timers = TimerCollection::new("io");
    /// let _bytes = timers.time("read", || std::fs::read("input.bin")).unwrap();
    ///
    /// timers
    ///     .persist("timings.json", ExportFormat::Json, WriteMode::Overwrite, TimeUnit::Seconds)
    ///     .unwrap();
    /// ```
    pub fn persist(
        &self,
        path: impl AsRef<Path>,
        format: ExportFormat,
        mode: WriteMode,
        unit: TimeUnit,
    ) -> Result<()> {
        let contents = format.encode(&self.to_pairs(unit))?;
        self.filesystem.write(path.as_ref(), mode, &contents)?;
        Ok(())
    }

    /// Runs `f` under a new timer named `name` and returns its result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyExists`] if the collection already holds a timer named `name`;
    /// `f` is not run in that case.
    pub fn time<R>(&mut self, name: impl Into<String>, f: impl FnOnce() -> R) -> Result<R> {
        Ok(self.start_timer(name)?.time(f))
    }
}

impl fmt::Display for TimerCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_table(TimeUnit::Seconds))
    }
}

impl<'a> IntoIterator for &'a TimerCollection {
    type Item = &'a Timer;
    type IntoIter = slice::Iter<'a, Timer>;

    fn into_iter(self) -> Self::IntoIter {
        self.timers.iter()
    }
}
