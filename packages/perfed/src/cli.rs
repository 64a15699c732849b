// Core logic of the `perfed` binary.
//
// The binary entry point in `main.rs` only parses arguments and maps the outcome to an exit code.

use std::ffi::OsStr;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Error, ExportFormat, Result, TimeUnit, TimerRegistry, WriteMode};

/// Input parameters for the [`run`] function.
///
/// This is the parsed and validated input that the core logic operates on.
#[doc(hidden)]
#[derive(Debug)]
#[allow(
    clippy::exhaustive_structs,
    reason = "This is a hidden struct for internal/test use only"
)]
pub struct RunInput {
    /// The program to time followed by its arguments.
    pub command: Vec<String>,
    /// How many times to run the program.
    pub runs: u32,
    /// Unit used for the printed tables and the persisted file.
    pub unit: TimeUnit,
    /// Whether to print the average/max/min table after the timings.
    pub stats: bool,
    /// File to persist the timings to, if any.
    pub output: Option<PathBuf>,
    /// Format of the persisted file.
    pub format: ExportFormat,
    /// How the persisted file is opened.
    pub mode: WriteMode,
}

/// The outcome of a completed run.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[allow(
    clippy::exhaustive_structs,
    reason = "This is a hidden struct for internal/test use only"
)]
pub struct RunOutcome {
    /// How many times the program was run.
    pub runs: u32,
    /// How many of the runs exited unsuccessfully.
    pub failed_runs: u32,
}

impl RunOutcome {
    /// Whether every run of the program exited successfully.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.failed_runs == 0
    }
}

/// Core logic of the tool, extracted for testability.
///
/// Runs the command `input.runs` times, each run timed by a [`Decorator`](crate::Decorator),
/// then prints the timings to stdout and persists them if requested.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if no command is given or `runs` is zero, and
/// [`Error::Io`] if the command cannot be started or the timings cannot be written.
#[doc(hidden)]
#[cfg_attr(test, mutants::skip)] // Writes to the real stdout; covered through `run_with_registry`.
pub fn run(input: &RunInput) -> Result<RunOutcome> {
    let mut registry = TimerRegistry::new();
    run_with_registry(input, &mut registry, &mut io::stdout().lock())
}

/// Internal implementation of `run` that accepts the registry and the output sink.
fn run_with_registry(
    input: &RunInput,
    registry: &mut TimerRegistry,
    out: &mut impl Write,
) -> Result<RunOutcome> {
    let Some((program, args)) = input.command.split_first() else {
        return Err(Error::invalid_argument(
            "",
            "a command to time must follow the options",
        ));
    };

    if input.runs == 0 {
        return Err(Error::invalid_argument("0", "runs must be at least 1"));
    }

    let name = timer_name(program);
    let mut run_command = registry
        .register(name.clone())?
        .wrap(|()| Command::new(program).args(args).status());

    let mut failed_runs: u32 = 0;
    for _ in 0..input.runs {
        let status = run_command(())??;

        if !status.success() {
            failed_runs = failed_runs.saturating_add(1);
        }
    }

    let collection = registry.get(&name)?;
    let collection = collection.borrow();

    collection.render(input.unit, out)?;

    if input.stats {
        writeln!(out)?;
        collection.render_summary(input.unit, out)?;
    }

    if let Some(path) = &input.output {
        collection.persist(path, input.format, input.mode, input.unit)?;
    }

    Ok(RunOutcome {
        runs: input.runs,
        failed_runs,
    })
}

/// Timers are named after the file name of the program, without its directory.
fn timer_name(program: &str) -> String {
    Path::new(program)
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or(program)
        .to_string()
}
