//! Time units and nanosecond conversion.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

const NANOS_PER_MILLI: f64 = 1e6;
const NANOS_PER_SEC: f64 = 1e9;
const SECS_PER_MIN: f64 = 60.0;

/// A unit in which elapsed time is reported.
///
/// Parsed from exactly the strings `ns`, `ms`, `sec` and `min`; case and whitespace matter.
///
/// # Examples
///
/// ```
/// use perfed::TimeUnit;
///
/// let unit: TimeUnit = "ms".parse().unwrap();
/// assert_eq!(unit, TimeUnit::Milliseconds);
/// assert_eq!(unit.convert(2_500_000.0), 2.5);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TimeUnit {
    /// Nanoseconds (`ns`).
    Nanoseconds,

    /// Milliseconds (`ms`).
    Milliseconds,

    /// Seconds (`sec`).
    #[default]
    Seconds,

    /// Minutes (`min`).
    Minutes,
}

impl TimeUnit {
    /// All units, in ascending order of magnitude.
    pub const ALL: [Self; 4] = [
        Self::Nanoseconds,
        Self::Milliseconds,
        Self::Seconds,
        Self::Minutes,
    ];

    /// The short name of the unit, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nanoseconds => "ns",
            Self::Milliseconds => "ms",
            Self::Seconds => "sec",
            Self::Minutes => "min",
        }
    }

    /// Converts a nanosecond count into this unit.
    #[must_use]
    pub fn convert(self, nanos: f64) -> f64 {
        match self {
            Self::Nanoseconds => nanos,
            Self::Milliseconds => nanos / NANOS_PER_MILLI,
            Self::Seconds => nanos / NANOS_PER_SEC,
            Self::Minutes => nanos / NANOS_PER_SEC / SECS_PER_MIN,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ns" => Ok(Self::Nanoseconds),
            "ms" => Ok(Self::Milliseconds),
            "sec" => Ok(Self::Seconds),
            "min" => Ok(Self::Minutes),
            _ => Err(Error::invalid_argument(
                s,
                "unit must be one of: ns, ms, sec, min",
            )),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Converts a nanosecond count into the unit named by `unit`.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `unit` is not one of `ns`, `ms`, `sec` or `min`.
///
/// # Examples
///
/// ```
/// assert_eq!(perfed::convert(1_000_000.0, "sec").unwrap(), 0.001);
/// assert!(perfed::convert(1.0, "bogus").is_err());
/// ```
pub fn convert(nanos: f64, unit: &str) -> Result<f64> {
    Ok(unit.parse::<TimeUnit>()?.convert(nanos))
}
