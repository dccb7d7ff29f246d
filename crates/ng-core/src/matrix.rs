//! Dense integer matrix used for adjacency, fixed and flow payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::{ErrorInfo, NgError};

/// Row-major dense matrix of `i64` cells.
///
/// Rows index tails (out-vertices) and columns index heads (in-vertices), so
/// row sums are out-degrees and column sums are in-degrees.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntMatrix {
    rows: usize,
    cols: usize,
    cells: Vec<i64>,
}

impl IntMatrix {
    /// Creates a `rows × cols` matrix filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Builds a matrix from nested rows, rejecting ragged input.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, NgError> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(NgError::InputShape(
                    ErrorInfo::new("ragged-rows", "matrix rows have different lengths")
                        .with_context("row", index.to_string())
                        .with_context("expected", cols.to_string())
                        .with_context("found", row.len().to_string()),
                ));
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the flat row-major index of `(row, col)`.
    pub fn cell_index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    /// Returns `(row, col)` for a flat cell index.
    pub fn cell_position(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    /// Returns the value at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.cells[self.cell_index(row, col)]
    }

    /// Returns the value stored at a flat cell index.
    pub fn cell(&self, index: usize) -> i64 {
        self.cells[index]
    }

    /// Overwrites the value at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, value: i64) {
        let index = self.cell_index(row, col);
        self.cells[index] = value;
    }

    /// Adds `delta` to the value at `(row, col)` and returns the new value.
    pub fn add(&mut self, row: usize, col: usize, delta: i64) -> i64 {
        let index = self.cell_index(row, col);
        self.cells[index] += delta;
        self.cells[index]
    }

    /// Returns a read-only view of one row.
    pub fn row(&self, row: usize) -> &[i64] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[i64] {
        &self.cells
    }

    /// Returns the sum of every row.
    pub fn row_sums(&self) -> Vec<i64> {
        (0..self.rows).map(|row| self.row(row).iter().sum()).collect()
    }

    /// Returns the sum of every column.
    pub fn col_sums(&self) -> Vec<i64> {
        let mut sums = vec![0; self.cols];
        for row in 0..self.rows {
            for (col, value) in self.row(row).iter().enumerate() {
                sums[col] += value;
            }
        }
        sums
    }

    /// Returns whether every cell is 0 or 1.
    pub fn is_binary(&self) -> bool {
        self.cells.iter().all(|&value| value == 0 || value == 1)
    }

    /// Returns the matrix as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<i64>> {
        (0..self.rows).map(|row| self.row(row).to_vec()).collect()
    }

    /// Computes the canonical structural hash of the matrix.
    pub fn canonical_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update((self.rows as u64).to_le_bytes());
        hasher.update((self.cols as u64).to_le_bytes());
        for value in &self.cells {
            hasher.update(value.to_le_bytes());
        }
        format!("{:x}", hasher.finalize())
    }
}

impl fmt::Display for IntMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for value in self.row(row) {
                write!(f, "{value:>4} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
