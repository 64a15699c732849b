//! Binary entry point for the perfed tool.
//!
//! This module is excluded from mutation testing because testing process entry/exit behavior
//! is impractical - it requires spawning subprocesses and checking exit codes.

use std::path::PathBuf;
use std::process::ExitCode;

use argh::FromArgs;
use perfed::{ExportFormat, RunInput, TimeUnit, WriteMode, run};

/// Runs a command one or more times and reports how long each run took.
#[derive(FromArgs)]
struct Args {
    /// how many times to run the command (default 1)
    #[argh(option, default = "1")]
    runs: u32,

    /// unit to report durations in: ns, ms, sec, min (default sec)
    #[argh(option)]
    unit: Option<TimeUnit>,

    /// also print the average, maximum and minimum duration
    #[argh(switch)]
    stats: bool,

    /// file to persist the durations to
    #[argh(option)]
    output: Option<PathBuf>,

    /// format of the output file: csv, json (default csv)
    #[argh(option)]
    format: Option<ExportFormat>,

    /// how to open the output file: overwrite, create-exclusive, append (default append)
    #[argh(option)]
    mode: Option<WriteMode>,

    /// the command to time, followed by its arguments
    #[argh(positional, greedy)]
    command: Vec<String>,
}

// Binary entry point - mutations would require subprocess testing which is impractical.
#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    let args: Args = argh::from_env();

    let input = RunInput {
        command: args.command,
        runs: args.runs,
        unit: args.unit.unwrap_or_default(),
        stats: args.stats,
        output: args.output,
        format: args.format.unwrap_or_default(),
        mode: args.mode.unwrap_or_default(),
    };

    match run(&input) {
        Ok(outcome) => {
            if outcome.succeeded() {
                ExitCode::SUCCESS
            } else {
                eprintln!(
                    "{} of {} runs exited unsuccessfully",
                    outcome.failed_runs, outcome.runs
                );
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
