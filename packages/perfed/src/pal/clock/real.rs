//! Real platform implementation backed by the operating system monotonic clock.

use std::sync::LazyLock;
use std::time::Instant;

use crate::pal::Platform;

/// The epoch all real timestamps are measured from. Initialized by the first reading.
static EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Real implementation of the platform abstraction using [`Instant`].
#[derive(Debug, Clone)]
pub(crate) struct RealPlatform;

impl Platform for RealPlatform {
    fn now_nanos(&self) -> u64 {
        EPOCH
            .elapsed()
            .as_nanos()
            .try_into()
            .expect("process uptime of over 500 years does not fit in u64 nanoseconds")
    }
}
