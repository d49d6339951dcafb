//! Tidy, column-ordered result tables.

use std::io::Write;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::Result;

/// One column of a [`Frame`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Column {
    Text(Vec<String>),
    Integer(Vec<i64>),
    Float(Vec<Option<f64>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Text(values) => values.len(),
            Column::Integer(values) => values.len(),
            Column::Float(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render one cell as text. Missing floats render as an empty string.
    pub fn cell(&self, row: usize) -> Option<String> {
        match self {
            Column::Text(values) => values.get(row).cloned(),
            Column::Integer(values) => values.get(row).map(|v| v.to_string()),
            Column::Float(values) => values
                .get(row)
                .map(|v| v.map(|v| v.to_string()).unwrap_or_default()),
        }
    }
}

/// A tidy table: named columns in a fixed order, all of the same length.
///
/// Serializes as a JSON object of column name to values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Frame {
    columns: IndexMap<String, Column>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column.
    ///
    /// # Panics
    ///
    /// Panics if the column length differs from the existing columns; every
    /// frame in this crate is built from one row list, so a mismatch is a
    /// programming error.
    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Self {
        if let Some(first) = self.columns.values().next() {
            assert_eq!(first.len(), column.len(), "frame columns must be row-aligned");
        }
        self.columns.insert(name.into(), column);
        self
    }

    pub fn text<I, S>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_column(name, Column::Text(values.into_iter().map(Into::into).collect()))
    }

    pub fn integer<I, N>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<i64>,
    {
        self.with_column(name, Column::Integer(values.into_iter().map(Into::into).collect()))
    }

    pub fn float<I>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        self.with_column(name, Column::Float(values.into_iter().collect()))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.columns.values().next().map_or(0, Column::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|k| k.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// All rows rendered as text, in column order.
    pub fn rows(&self) -> Vec<Vec<String>> {
        (0..self.len())
            .map(|row| {
                self.columns
                    .values()
                    .map(|c| c.cell(row).unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    /// Write the frame as CSV with a header row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        if self.column_count() > 0 {
            out.write_record(self.column_names())?;
        }
        for row in self.rows() {
            out.write_record(&row)?;
        }
        out.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

/// Conversion of a typed view result into a tidy [`Frame`].
pub trait ToFrame {
    fn to_frame(&self) -> Frame;
}
