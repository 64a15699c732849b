//! Aggregate statistics over a timer collection.

use std::fmt;

use crate::export::format_duration;
use crate::timer::nanos_as_f64;
use crate::{Alignment, Table, TimeUnit};

/// Average, maximum and minimum elapsed time across the timers of a collection.
///
/// Obtained from [`TimerCollection::summary()`](crate::TimerCollection::summary). The
/// statistics are computed in nanoseconds and converted to [`unit()`](Self::unit) once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    unit: TimeUnit,
    average: f64,
    max: f64,
    min: f64,
}

impl Summary {
    /// Computes the summary of the given nanosecond readings, or `None` if there are none.
    pub(crate) fn from_nanos(readings: &[u64], unit: TimeUnit) -> Option<Self> {
        let max = readings.iter().copied().max()?;
        let min = readings.iter().copied().min()?;

        let total: u128 = readings.iter().copied().map(u128::from).sum();
        let count = u128::try_from(readings.len()).expect("usize always fits in u128");
        let mean = total
            .checked_div(count)
            .expect("guarded by the max() above returning Some");
        let remainder = total
            .checked_rem(count)
            .expect("guarded by the max() above returning Some");

        // Whole part and remainder keep integer precision before the single float conversion.
        let mean_nanos = nanos_as_f64(u64::try_from(mean).expect("mean never exceeds max"))
            + nanos_as_f64(u64::try_from(remainder).expect("remainder is below count"))
                / nanos_as_f64(u64::try_from(count).expect("count originates from usize"));

        Some(Self {
            unit,
            average: unit.convert(mean_nanos),
            max: unit.convert(nanos_as_f64(max)),
            min: unit.convert(nanos_as_f64(min)),
        })
    }

    /// The unit all statistics are expressed in.
    #[must_use]
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Mean elapsed time.
    #[must_use]
    pub fn average(&self) -> f64 {
        self.average
    }

    /// Longest elapsed time.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Shortest elapsed time.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The `Stat`/`Value` table of this summary.
    #[must_use]
    pub fn to_table(&self) -> Table {
        let mut table = Table::new([("Stat", Alignment::Left), ("Value", Alignment::Right)]);
        table.push_row(["Average".to_string(), format_duration(self.average)]);
        table.push_row(["Max".to_string(), format_duration(self.max)]);
        table.push_row(["Min".to_string(), format_duration(self.min)]);
        table
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_table())
    }
}
