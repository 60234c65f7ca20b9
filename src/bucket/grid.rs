//! Dense row × column count grid.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Fixed-shape table of counts with ordered row and column labels.
///
/// Every cell starts at zero. Serializes as `{row: {column: count}}` in
/// row and column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<String>,
    columns: Vec<String>,
    cells: Vec<Vec<u64>>,
}

impl Grid {
    /// Creates an all-zero grid.
    pub fn new<R, C>(rows: R, columns: C) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let rows: Vec<String> = rows.into_iter().map(Into::into).collect();
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let cells = vec![vec![0; columns.len()]; rows.len()];
        Self {
            rows,
            columns,
            cells,
        }
    }

    fn row_index(&self, row: &str) -> Option<usize> {
        self.rows.iter().position(|r| r == row)
    }

    fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Adds `count` to a cell. Returns false, changing nothing, when the row
    /// or column does not exist.
    pub fn add(&mut self, row: &str, column: &str, count: u64) -> bool {
        match (self.row_index(row), self.column_index(column)) {
            (Some(r), Some(c)) => {
                self.cells[r][c] += count;
                true
            }
            _ => false,
        }
    }

    /// Value of a cell.
    pub fn get(&self, row: &str, column: &str) -> Option<u64> {
        let r = self.row_index(row)?;
        let c = self.column_index(column)?;
        Some(self.cells[r][c])
    }

    /// Row labels in order.
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Column labels in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Iterates `(row label, cells)` in row order.
    pub fn iter_rows(&self) -> impl Iterator<Item = (&str, &[u64])> + '_ {
        self.rows
            .iter()
            .zip(&self.cells)
            .map(|(label, cells)| (label.as_str(), cells.as_slice()))
    }

    /// Sum of one row.
    pub fn row_total(&self, row: &str) -> Option<u64> {
        self.row_index(row).map(|r| self.cells[r].iter().sum())
    }

    /// Sum of one column.
    pub fn column_total(&self, column: &str) -> Option<u64> {
        let c = self.column_index(column)?;
        Some(self.cells.iter().map(|row| row[c]).sum())
    }

    /// Sum of every cell.
    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().sum()
    }
}

struct GridRow<'a> {
    columns: &'a [String],
    cells: &'a [u64],
}

impl Serialize for GridRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, count) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(column, count)?;
        }
        map.end()
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (label, cells) in self.iter_rows() {
            map.serialize_entry(
                label,
                &GridRow {
                    columns: &self.columns,
                    cells,
                },
            )?;
        }
        map.end()
    }
}
