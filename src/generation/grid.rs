//! # Stimulus Grid
//!
//! Two-dimensional array of optional values shown to participants.

use serde::{Deserialize, Serialize};

/// Coordinate of a cell within a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    /// Creates a new cell coordinate.
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// A `width x height` grid where each cell is empty or holds one value.
///
/// Stored column-major: cell `(x, y)` lives at `columns[x][y]`, which is also
/// the layout of the serialized `values` array.
///
/// # Examples
///
/// ```
/// use stimgrid::{Cell, Grid};
///
/// let mut grid = Grid::new(3, 2);
/// assert_eq!(grid.empty_count(), 6);
///
/// grid.set(Cell::new(2, 1), Some(7));
/// assert_eq!(grid.get(Cell::new(2, 1)), Some(7));
/// assert_eq!(grid.occupied_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Grid {
    columns: Vec<Vec<Option<i64>>>,
}

impl Grid {
    /// Creates an empty grid.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            columns: vec![vec![None; height]; width],
        }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Gets the value at a cell, `None` if the cell is empty or out of bounds.
    pub fn get(&self, cell: Cell) -> Option<i64> {
        self.columns
            .get(cell.x)
            .and_then(|column| column.get(cell.y))
            .copied()
            .flatten()
    }

    /// Sets the value at a cell, returning the previous value.
    ///
    /// Out-of-bounds cells are ignored.
    pub fn set(&mut self, cell: Cell, value: Option<i64>) -> Option<i64> {
        match self
            .columns
            .get_mut(cell.x)
            .and_then(|column| column.get_mut(cell.y))
        {
            Some(slot) => std::mem::replace(slot, value),
            None => None,
        }
    }

    /// Checks if a cell is inside the grid and holds no value.
    pub fn is_empty_at(&self, cell: Cell) -> bool {
        matches!(
            self.columns.get(cell.x).and_then(|column| column.get(cell.y)),
            Some(None)
        )
    }

    /// Checks if a cell holds a value.
    pub fn is_occupied_at(&self, cell: Cell) -> bool {
        self.get(cell).is_some()
    }

    /// Iterates over every value present in the grid, column by column.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.columns.iter().flat_map(|column| column.iter().flatten().copied())
    }

    pub fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    pub fn occupied_count(&self) -> usize {
        self.values().count()
    }

    pub fn empty_count(&self) -> usize {
        self.cell_count() - self.occupied_count()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    /// Counts the cells holding `value`.
    pub fn count_of(&self, value: i64) -> usize {
        self.values().filter(|&v| v == value).count()
    }
}
