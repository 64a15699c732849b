//! Serialization of timer results for persisting to files.

use std::fmt;
use std::io;
use std::str::FromStr;

use serde::Serializer as _;
use serde_json::ser::Formatter;

use crate::{Error, Result};

/// File format used by [`TimerCollection::persist()`](crate::TimerCollection::persist).
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ExportFormat {
    /// One `name,duration` line per timer, no header row.
    ///
    /// Names are written as they are, without quoting or escaping. A name containing `,` or a
    /// line break produces a line that does not split back into the original two fields; use
    /// [`Json`](Self::Json) for such names.
    #[default]
    Csv,

    /// A single-line JSON object mapping each timer name to its duration.
    Json,
}

impl ExportFormat {
    /// The name of the format, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    /// Encodes `(name, duration)` pairs in this format.
    pub(crate) fn encode(self, pairs: &[(String, f64)]) -> Result<Vec<u8>> {
        match self {
            Self::Csv => Ok(encode_csv(pairs).into_bytes()),
            Self::Json => encode_json(pairs),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(Error::invalid_argument(s, "format must be one of: csv, json")),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How [`TimerCollection::persist()`](crate::TimerCollection::persist) opens the target file.
///
/// Parsed from exactly `overwrite`, `create-exclusive` and `append`, or from the short forms
/// `w`, `x` and `a`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum WriteMode {
    /// Truncate the file, creating it if needed.
    Overwrite,

    /// Create the file, failing if it already exists.
    CreateExclusive,

    /// Append to the file, creating it if needed.
    #[default]
    Append,
}

impl WriteMode {
    /// The long name of the mode, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Overwrite => "overwrite",
            Self::CreateExclusive => "create-exclusive",
            Self::Append => "append",
        }
    }
}

impl FromStr for WriteMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "overwrite" | "w" => Ok(Self::Overwrite),
            "create-exclusive" | "x" => Ok(Self::CreateExclusive),
            "append" | "a" => Ok(Self::Append),
            _ => Err(Error::invalid_argument(
                s,
                "write mode must be one of: overwrite (w), create-exclusive (x), append (a)",
            )),
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formats a duration the way both encoders print numbers.
///
/// Debug formatting of `f64` is the shortest representation that round-trips and keeps the
/// `.0` on whole numbers, the same digits `serde_json` produces.
pub(crate) fn format_duration(duration: f64) -> String {
    format!("{duration:?}")
}

fn encode_csv(pairs: &[(String, f64)]) -> String {
    pairs
        .iter()
        .map(|(name, duration)| format!("{name},{}\n", format_duration(*duration)))
        .collect()
}

fn encode_json(pairs: &[(String, f64)]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter);
    serializer.collect_map(pairs.iter().map(|(name, duration)| (name, duration)))?;
    Ok(buffer)
}

/// Compact single-line JSON with a space after each `:` and `,`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
