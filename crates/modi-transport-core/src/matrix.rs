use std::ops::{Index, IndexMut};

use crate::TransportError;

/// Coordinate of a cell: `row` indexes supply nodes, `col` indexes demand nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn shares_line_with(&self, other: Cell) -> bool {
        self.row == other.row || self.col == other.col
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Dense row-major `rows x cols` grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    values: Vec<T>,
}

pub type Allocation = Grid<i64>;
pub type CostMatrix = Grid<f64>;

impl<T: Clone> Grid<T> {
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            rows,
            cols,
            values: vec![fill; rows * cols],
        }
    }

    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, TransportError> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        let mut values = Vec::with_capacity(row_count * cols);
        for row in rows {
            if row.len() != cols {
                return Err(TransportError::InvalidInput(
                    "matrix rows must have identical length".to_string(),
                ));
            }
            values.extend(row);
        }
        Ok(Self {
            rows: row_count,
            cols,
            values,
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.rows).map(|row| self.row(row).to_vec()).collect()
    }
}

impl<T> Grid<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub fn get(&self, cell: Cell) -> Option<&T> {
        if self.contains(cell) {
            self.values.get(cell.row * self.cols + cell.col)
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.values[row * self.cols..(row + 1) * self.cols]
    }

    /// Coordinates in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Cell { row, col }))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Cell, &T)> {
        self.cells().zip(self.values.iter())
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values
    }
}

impl<T> Index<Cell> for Grid<T> {
    type Output = T;

    fn index(&self, cell: Cell) -> &T {
        assert!(self.contains(cell), "cell {cell:?} outside grid");
        &self.values[cell.row * self.cols + cell.col]
    }
}

impl<T> IndexMut<Cell> for Grid<T> {
    fn index_mut(&mut self, cell: Cell) -> &mut T {
        assert!(self.contains(cell), "cell {cell:?} outside grid");
        &mut self.values[cell.row * self.cols + cell.col]
    }
}
