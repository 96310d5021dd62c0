//! Row-major 2-D view of a bipolar vector.

use std::fmt;

use crate::error::{HopfieldError, Result};

use super::vector::{BipolarVector, ON};

/// A rectangular grid of bipolar cells, stored flat in row-major order.
///
/// Only `to_grid` and `Grid::from_rows` build one, and both check that
/// `cells.len() == rows * cols`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<i8>,
    rows: usize,
    cols: usize,
}

impl Grid {
    /// Build a grid from explicit rows.
    ///
    /// Ragged rows fail with `ShapeMismatch`; a non-bipolar cell fails with
    /// `InvalidElement` carrying its row-major index.
    pub fn from_rows(rows: Vec<Vec<i8>>) -> Result<Self> {
        let cols = rows.first().map(Vec::len).unwrap_or(0);
        for row in &rows {
            if row.len() != cols {
                return Err(HopfieldError::ShapeMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
        }
        let height = rows.len();
        let flat = BipolarVector::new(rows.into_iter().flatten().collect())?;
        Ok(Self {
            cells: flat.into_inner(),
            rows: height,
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i8> {
        self.offset(row, col).map(|i| self.cells[i])
    }

    pub fn row(&self, row: usize) -> Option<&[i8]> {
        if row < self.rows {
            let start = row * self.cols;
            Some(&self.cells[start..start + self.cols])
        } else {
            None
        }
    }

    /// Flip one cell.
    ///
    /// An out-of-range coordinate is reported against its own axis:
    /// `index` is the offending row (or column) and `len` the row (or column) count.
    pub fn toggle(&mut self, row: usize, col: usize) -> Result<()> {
        if row >= self.rows {
            return Err(HopfieldError::IndexOutOfBounds {
                index: row,
                len: self.rows,
            });
        }
        if col >= self.cols {
            return Err(HopfieldError::IndexOutOfBounds {
                index: col,
                len: self.cols,
            });
        }
        let cell = &mut self.cells[row * self.cols + col];
        *cell = -*cell;
        Ok(())
    }

    /// Row-major offset, `None` outside the grid. Never overflows since
    /// `row * cols + col < cells.len()` whenever both bounds hold.
    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}

/// `#` for +1, `.` for -1, one line per row.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            if r > 0 {
                writeln!(f)?;
            }
            for cell in self.row(r).unwrap_or_default() {
                f.write_str(if *cell == ON { "#" } else { "." })?;
            }
        }
        Ok(())
    }
}

/// Reshape a flat vector into `rows × cols`, row-major.
///
/// A shape whose cell count does not fit in `usize` can never match a
/// vector's length and fails with `ShapeMismatch`.
pub fn to_grid(vector: &BipolarVector, rows: usize, cols: usize) -> Result<Grid> {
    let expected = rows.saturating_mul(cols);
    if rows.checked_mul(cols) != Some(vector.len()) {
        return Err(HopfieldError::ShapeMismatch {
            expected,
            actual: vector.len(),
        });
    }
    Ok(Grid {
        cells: vector.as_slice().to_vec(),
        rows,
        cols,
    })
}

/// Concatenate the rows of a grid back into a flat vector.
pub fn from_grid(grid: &Grid) -> BipolarVector {
    BipolarVector::from_spins(grid.cells.clone())
}
