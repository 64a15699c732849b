//! Platform abstraction trait definitions.

use std::fmt::Debug;

/// Provides monotonic timestamps.
///
/// This trait abstracts the clock source so that timers can be driven either by the
/// operating system clock or by a fake clock whose readings the test controls.
pub(crate) trait Platform: Debug + Send + Sync + 'static {
    /// Gets the current monotonic timestamp in nanoseconds since an arbitrary epoch.
    ///
    /// Successive readings never decrease. The epoch is shared by every reading taken in the
    /// same process, so readings from different timers can be compared.
    fn now_nanos(&self) -> u64;
}
