//! Plain-text table rendering.

use std::{fmt, iter};

/// Horizontal alignment of a table column.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum Alignment {
    /// Pad on the right. Used for names.
    #[default]
    Left,

    /// Pad on the left. Used for numbers.
    Right,
}

/// A table of text cells rendered with aligned columns and a rule under the header.
///
/// ```text
/// Timer    Duration
/// -------  --------
/// parse       0.001
/// compile     0.125
/// ```
///
/// # Examples
///
/// ```
/// use perfed::{Alignment, Table};
///
/// let mut table = Table::new([("Stat", Alignment::Left), ("Value", Alignment::Right)]);
/// table.push_row(["Average", "0.002"]);
///
/// let text = table.to_string();
/// assert!(text.starts_with("Stat"));
/// assert!(text.contains("Average"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Table {
    headers: Vec<String>,
    alignments: Vec<Alignment>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates a table with the given column headers and alignments.
    pub fn new<H: Into<String>>(columns: impl IntoIterator<Item = (H, Alignment)>) -> Self {
        let (headers, alignments) = columns
            .into_iter()
            .map(|(header, alignment)| (header.into(), alignment))
            .unzip();

        Self {
            headers,
            alignments,
            rows: Vec::new(),
        }
    }

    /// Appends a row. Missing cells render empty; cells beyond the header count are ignored.
    pub fn push_row<C: Into<String>>(&mut self, cells: impl IntoIterator<Item = C>) {
        let mut row: Vec<String> = cells
            .into_iter()
            .take(self.headers.len())
            .map(Into::into)
            .collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    /// The column headers.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The rows, in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    fn column_widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(column))
                    .map(|cell| cell.chars().count())
                    .fold(header.chars().count(), usize::max)
            })
            .collect()
    }
}

fn write_line<'a>(
    f: &mut fmt::Formatter<'_>,
    cells: impl IntoIterator<Item = &'a str>,
    widths: &[usize],
    alignments: &[Alignment],
) -> fmt::Result {
    let mut line = String::new();

    for (column, ((cell, width), alignment)) in
        cells.into_iter().zip(widths).zip(alignments).enumerate()
    {
        if column > 0 {
            line.push_str("  ");
        }

        let padding = width.saturating_sub(cell.chars().count());
        match alignment {
            Alignment::Left => {
                line.push_str(cell);
                line.extend(iter::repeat_n(' ', padding));
            }
            Alignment::Right => {
                line.extend(iter::repeat_n(' ', padding));
                line.push_str(cell);
            }
        }
    }

    writeln!(f, "{}", line.trim_end())
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.column_widths();
        let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();

        write_line(
            f,
            self.headers.iter().map(String::as_str),
            &widths,
            &self.alignments,
        )?;
        write_line(f, rule.iter().map(String::as_str), &widths, &self.alignments)?;

        for row in &self.rows {
            write_line(f, row.iter().map(String::as_str), &widths, &self.alignments)?;
        }

        Ok(())
    }
}
