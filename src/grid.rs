use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::Age;
use crate::config::Config;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Cell ({row}, {col}) is outside of a {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Row {row} has {got} cells, expected {exp}")]
    Ragged { row: usize, exp: usize, got: usize },
}

/// A fixed-size rectangle of cell ages, with `(0, 0)` in the top left.
///
/// Cells are stored row-major, so `(row, col)` lives at `row * cols + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Age>,
}

impl Grid {
    /// Create an all-dead grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        }
    }

    /// Build a grid out of rows of ages. Every row must be the same length.
    pub fn from_ages(rows: &[Vec<Age>]) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(rows.len() * cols);

        for (row, ages) in rows.iter().enumerate() {
            if ages.len() != cols {
                return Err(GridError::Ragged {
                    row,
                    exp: cols,
                    got: ages.len(),
                });
            }

            cells.extend_from_slice(ages);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Wrap row-major `cells`. The caller guarantees `cells.len() == rows * cols`.
    pub(crate) fn from_parts(rows: usize, cols: usize, cells: Vec<Age>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);

        Self { rows, cols, cells }
    }

    /// Create a grid whose height and width are drawn from `config.size_range`, where each cell
    /// is a coin flip between dead and alive with an age in `1..=config.max_age`.
    pub fn random<G: Rng>(config: &Config, rng: &mut G) -> Self {
        let rows = rng.gen_range(config.size_range.clone());
        let cols = rng.gen_range(config.size_range.clone());

        let cells = (0..rows * cols)
            .map(|_| {
                if rng.gen_bool(0.5) {
                    rng.gen_range(1..=config.max_age)
                } else {
                    0
                }
            })
            .collect();

        debug!(rows, cols, "Generated random grid");

        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Age, GridError> {
        let i = self.index(row, col)?;

        Ok(self.cells[i])
    }

    pub fn set(&mut self, row: usize, col: usize, age: Age) -> Result<(), GridError> {
        let i = self.index(row, col)?;
        self.cells[i] = age;

        Ok(())
    }

    /// Iterate over every cell as `(row, col, age)`, row by row.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Age)> + '_ {
        let cols = self.cols;

        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &age)| (i / cols, i % cols, age))
    }

    /// The ages of a single row. Panics if `row` is out of bounds.
    pub(crate) fn row(&self, row: usize) -> &[Age] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    pub(crate) fn ages(&self) -> &[Age] {
        &self.cells
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&age| age > 0).count()
    }

    pub fn is_dead(&self) -> bool {
        self.cells.iter().all(|&age| age == 0)
    }

    /// Kill every cell, keeping the dimensions
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, GridError> {
        if !self.in_bounds(row, col) {
            return Err(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }

        Ok(row * self.cols + col)
    }
}
