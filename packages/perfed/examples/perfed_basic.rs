//! Simplified example demonstrating key `perfed` types working together.
//!
//! This example shows how to use the main types in the `perfed` package:
//! - `TimerCollection`: Groups named timers and reports on them
//! - `TimerRegistry`: Times every call made through a registered decorator
//!
//! Run with: `cargo run --example perfed_basic`.

use std::env;
use std::fmt::Write;
use std::hint::black_box;
use std::thread;
use std::time::Duration;

use perfed::{ExportFormat, TimeUnit, TimerCollection, TimerRegistry, WriteMode};

fn main() {
    println!("=== Wall-Clock Timing Example ===");
    println!();

    let mut timers = TimerCollection::new("startup");

    // Manual start and stop.
    timers.start_timer("sleep").unwrap();
    thread::sleep(Duration::from_millis(15));
    timers.stop_timer("sleep").unwrap();

    // Scoped measurement: the timer stops when the span is dropped.
    {
        let _span = timers.measure("string_formatting").unwrap();
        let mut result = String::new();
        for i in 0..10_000 {
            write!(result, "line {i} ").unwrap();
        }
        black_box(result);
    }

    // Closure measurement.
    let total = timers
        .time("summation", || black_box((0..1_000_000_u64).sum::<u64>()))
        .unwrap();
    println!("Sum: {total}");
    println!();

    timers.print_to_stdout(TimeUnit::Milliseconds);

    let mut stats = Vec::new();
    timers
        .render_summary(TimeUnit::Milliseconds, &mut stats)
        .unwrap();
    println!("{}", String::from_utf8_lossy(&stats));

    // Every call through the decorator gets its own timer.
    let mut registry = TimerRegistry::new();
    let mut fibonacci = registry.register("fibonacci").unwrap().wrap(|n: u32| {
        let (mut a, mut b) = (0_u64, 1_u64);
        for _ in 0..n {
            (a, b) = (b, a.wrapping_add(b));
        }
        a
    });

    for n in [10, 50, 90] {
        println!("fibonacci({n}) = {}", fibonacci(n).unwrap());
    }
    println!();

    let calls = registry.get("fibonacci").unwrap();
    calls.borrow().print_to_stdout(TimeUnit::Nanoseconds);

    let path = env::temp_dir().join("perfed_basic.json");
    timers
        .persist(
            &path,
            ExportFormat::Json,
            WriteMode::Overwrite,
            TimeUnit::Seconds,
        )
        .unwrap();
    println!("Wrote {}", path.display());
}
