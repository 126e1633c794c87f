//! Named load series sharing one time index.

use std::fmt;

use crate::timeline::TimeIndex;

/// Reserved series name for the elementwise department sum.
pub const TOTAL_LOAD: &str = "Total Load";

/// Error inserting a series into a [`LoadTable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// Series length does not match the table's time index.
    LengthMismatch {
        /// Name of the offending series.
        name: String,
        /// Expected length (index length).
        expected: usize,
        /// Actual series length.
        actual: usize,
    },
    /// A series with this name is already present.
    DuplicateSeries {
        /// The duplicated name.
        name: String,
    },
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "table error: series \"{name}\" has {actual} points, index has {expected}"
            ),
            Self::DuplicateSeries { name } => {
                write!(f, "table error: series \"{name}\" already present")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Ordered collection of named load series over one shared [`TimeIndex`].
///
/// Every series has exactly `index.len()` points; the insert path enforces
/// the invariant so downstream aggregation never sees ragged data.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadTable {
    index: TimeIndex,
    series: Vec<(String, Vec<f32>)>,
}

impl LoadTable {
    /// Creates an empty table over the given index.
    pub fn new(index: TimeIndex) -> Self {
        Self {
            index,
            series: Vec::new(),
        }
    }

    /// The shared time index.
    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    /// Number of rows (timestamps).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of series columns.
    pub fn num_series(&self) -> usize {
        self.series.len()
    }

    /// Inserts a named series.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::LengthMismatch`] if `values.len()` differs from
    /// the index length, or [`TableError::DuplicateSeries`] if the name is
    /// already taken.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f32>) -> Result<(), TableError> {
        let name = name.into();
        if values.len() != self.index.len() {
            return Err(TableError::LengthMismatch {
                expected: self.index.len(),
                actual: values.len(),
                name,
            });
        }
        if self.series.iter().any(|(n, _)| *n == name) {
            return Err(TableError::DuplicateSeries { name });
        }
        self.series.push((name, values));
        Ok(())
    }

    /// Values of the named series, if present.
    pub fn get(&self, name: &str) -> Option<&[f32]> {
        self.series
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Series names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.series.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Elementwise sum across all member series at each timestamp.
    ///
    /// An existing [`TOTAL_LOAD`] column is skipped so the sum can be
    /// recomputed without double counting.
    pub fn total_load(&self) -> Vec<f32> {
        let mut total = vec![0.0_f32; self.index.len()];
        for (name, values) in &self.series {
            if name == TOTAL_LOAD {
                continue;
            }
            for (acc, v) in total.iter_mut().zip(values) {
                *acc += v;
            }
        }
        total
    }

    /// Computes the department sum and appends it under [`TOTAL_LOAD`].
    ///
    /// # Errors
    ///
    /// Returns [`TableError::DuplicateSeries`] if the total was already
    /// appended.
    pub fn push_total(&mut self) -> Result<(), TableError> {
        let total = self.total_load();
        self.insert(TOTAL_LOAD, total)
    }

    /// Formats row `i` as `timestamp | name=value ...` for the CLI report.
    pub fn format_row(&self, i: usize) -> Option<String> {
        let ts = self.index.get(i)?;
        let mut row = format!("{}", ts.format("%Y-%m-%d %H:%M"));
        row.push_str(" |");
        for (name, values) in &self.series {
            row.push_str(&format!("  {name}={:>8.2}", values.get(i)?));
        }
        Some(row)
    }
}
