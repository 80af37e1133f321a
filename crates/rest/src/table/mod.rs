//! Typed tables with described columns.
//!
//! Responsibilities:
//! - Hold the header and rows of a cat-style response.
//! - Reject rows that do not cover every column.
//!
//! Does NOT handle:
//! - Rendering (see [`crate::render`]).
//! - Mapping responses to rows (see [`projector`]).
//!
//! Invariants:
//! - Every row has exactly `columns().len()` cells.

pub mod projector;

use std::fmt;

use crate::error::TableError;

pub use projector::{Column, ColumnProjector, TableProjector};

/// Horizontal alignment of a column in text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Right,
}

/// Header entry: name, alignment and the text shown by `help`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub alignment: Alignment,
    pub description: String,
}

impl ColumnDef {
    pub fn new(
        name: impl Into<String>,
        alignment: Alignment,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            alignment,
            description: description.into(),
        }
    }
}

/// A single table value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Integer(i64),
    Text(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Text(text) if text.is_empty())
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Integer(i64::from(value))
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Integer(value) => write!(f, "{}", value),
            Cell::Text(text) => f.write_str(text),
        }
    }
}

/// Header plus rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    columns: Vec<ColumnDef>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// A table with the given header and no rows.
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[ColumnDef] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Append a row.
    ///
    /// # Errors
    /// Returns [`TableError::ColumnCountMismatch`] when the row width differs
    /// from the header; the table is left unchanged.
    pub fn add_row(&mut self, row: Vec<Cell>) -> Result<(), TableError> {
        if row.len() != self.columns.len() {
            return Err(TableError::ColumnCountMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Cell at `row` in the column called `column`.
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(index))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
