//! Fake platform implementation for testing.

use std::sync::{Arc, Mutex};

use crate::pal::Platform;

/// Fake implementation of the platform abstraction for testing.
///
/// The clock only moves when the test moves it. Multiple clones of the same `FakePlatform`
/// share the same reading, so a test can keep one clone and advance time while timers hold
/// the others.
#[derive(Clone, Debug)]
pub(crate) struct FakePlatform {
    now_nanos: Arc<Mutex<u64>>,
}

impl FakePlatform {
    /// Creates a new fake platform reading zero.
    pub(crate) fn new() -> Self {
        Self {
            now_nanos: Arc::new(Mutex::new(0)),
        }
    }

    /// Sets the current reading.
    pub(crate) fn set_now_nanos(&self, nanos: u64) {
        *self
            .now_nanos
            .lock()
            .expect("FakePlatform state lock should not be poisoned") = nanos;
    }

    /// Moves the current reading forward.
    pub(crate) fn advance_nanos(&self, nanos: u64) {
        let mut now = self
            .now_nanos
            .lock()
            .expect("FakePlatform state lock should not be poisoned");
        *now = now
            .checked_add(nanos)
            .expect("fake clock advanced past u64::MAX");
    }
}

impl Platform for FakePlatform {
    fn now_nanos(&self) -> u64 {
        *self
            .now_nanos
            .lock()
            .expect("FakePlatform state lock should not be poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initializes_with_zero_time() {
        let platform = FakePlatform::new();
        assert_eq!(platform.now_nanos(), 0);
    }

    #[test]
    fn sets_and_advances() {
        let platform = FakePlatform::new();
        platform.set_now_nanos(150);
        assert_eq!(platform.now_nanos(), 150);

        platform.advance_nanos(50);
        assert_eq!(platform.now_nanos(), 200);
    }

    #[test]
    fn shared_state_between_clones() {
        let platform1 = FakePlatform::new();
        let platform2 = platform1.clone();

        platform1.set_now_nanos(100);
        assert_eq!(platform2.now_nanos(), 100);

        platform2.advance_nanos(1);
        assert_eq!(platform1.now_nanos(), 101);
    }
}
