//! The bounded Life board.
//!
//! The logical `m x n` grid lives inside a `(m + 2) x (n + 2)` buffer whose
//! outer ring is always dead, so every logical cell has a full 3x3 window.

use crate::error::InvalidBoardError;
use crate::rule::*;
use itertools::Itertools;
use ndarray::iter::Windows;
use ndarray::prelude::*;
use ndarray::Data;
use std::fmt::{self, Display};

/// Smallest accepted size along either axis.
pub const MIN_SIZE: usize = 2;

const WINDOW: (usize, usize) = (3, 3);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
  /// Padded buffer, `padded[[r + 1, c + 1]]` is logical cell `(r, c)`.
  padded: Array2<Cell>,
}

impl Board {
  /// Validate `grid` and copy it into a fresh padded buffer.
  pub fn new<S, A>(grid: &ArrayBase<S, Ix2>) -> Result<Self, InvalidBoardError>
  where
    S: Data<Elem = A>,
    A: Copy + Into<i64>,
  {
    let (rows, cols) = grid.dim();
    if rows < MIN_SIZE || cols < MIN_SIZE {
      return Err(InvalidBoardError::InvalidShape { rows, cols });
    }

    if let Some(((row, col), &value)) = grid
      .indexed_iter()
      .find(|(_, &v)| !is_cell_value(v.into()))
    {
      return Err(InvalidBoardError::InvalidValue { row, col, value: value.into() });
    }

    let mut padded = Array2::<Cell>::zeros((rows + 2, cols + 2));
    padded
      .slice_mut(s![1..-1, 1..-1])
      .zip_mut_with(grid, |dst, &src| *dst = Into::<i64>::into(src) as Cell);

    Ok(Self { padded })
  }

  /// Build a board from row slices, rejecting ragged input.
  pub fn from_rows<R, A>(rows: &[R]) -> Result<Self, InvalidBoardError>
  where
    R: AsRef<[A]>,
    A: Copy + Into<i64>,
  {
    let cols = rows.first().map_or(0, |row| row.as_ref().len());
    if let Some(r) = rows.iter().position(|row| row.as_ref().len() != cols) {
      return Err(InvalidBoardError::invalid_type(format!(
        "row {} has {} cells, expected {}",
        r,
        rows[r].as_ref().len(),
        cols,
      )));
    }

    let grid: Array2<i64> = Array2::from_shape_fn((rows.len(), cols), |(r, c)| {
      rows[r].as_ref()[c].into()
    });
    Self::new(&grid)
  }

  /// An all-dead board.
  pub fn empty(rows: usize, cols: usize) -> Result<Self, InvalidBoardError> {
    Self::new(&Array2::<Cell>::zeros((rows, cols)))
  }

  pub fn rows(&self) -> usize {
    self.padded.nrows() - 2
  }

  pub fn cols(&self) -> usize {
    self.padded.ncols() - 2
  }

  /// `(rows, cols)` of the logical board.
  pub fn shape(&self) -> (usize, usize) {
    (self.rows(), self.cols())
  }

  pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
    if row < self.rows() && col < self.cols() {
      Some(self.padded[[row + 1, col + 1]])
    } else {
      None
    }
  }

  /// Panics if `(row, col)` is outside the logical board.
  pub fn set(&mut self, row: usize, col: usize, alive: bool) {
    assert!(
      row < self.rows() && col < self.cols(),
      "cell ({}, {}) is outside a {}x{} board",
      row,
      col,
      self.rows(),
      self.cols(),
    );
    self.padded[[row + 1, col + 1]] = if alive { ALIVE } else { DEAD };
  }

  /// The logical board, a view into the interior of the padded buffer.
  pub fn cells(&self) -> ArrayView2<'_, Cell> {
    self.padded.slice(s![1..-1, 1..-1])
  }

  pub(crate) fn cells_mut(&mut self) -> ArrayViewMut2<'_, Cell> {
    self.padded.slice_mut(s![1..-1, 1..-1])
  }

  /// The whole padded buffer including the dead border.
  pub fn padded(&self) -> ArrayView2<'_, Cell> {
    self.padded.view()
  }

  /// The 3x3 block centered on logical cell `(row, col)`.
  ///
  /// Panics if `(row, col)` is outside the logical board.
  pub fn neighbor_window(&self, row: usize, col: usize) -> ArrayView2<'_, Cell> {
    assert!(
      row < self.rows() && col < self.cols(),
      "cell ({}, {}) is outside a {}x{} board",
      row,
      col,
      self.rows(),
      self.cols(),
    );
    self.padded.slice(s![row..row + 3, col..col + 3])
  }

  /// Every logical cell's 3x3 block, in row-major order.
  ///
  /// The windows overlap and borrow the padded buffer, nothing is copied.
  pub fn all_neighbor_windows(&self) -> Windows<'_, Cell, Ix2> {
    self.padded.windows(WINDOW)
  }

  /// Number of alive neighbors of a single cell.
  pub fn neighbors(&self, row: usize, col: usize) -> u8 {
    self.neighbor_window(row, col).sum() - self.padded[[row + 1, col + 1]]
  }

  pub fn population(&self) -> usize {
    self.cells().iter().filter(|&&c| c == ALIVE).count()
  }

  pub fn border_is_dead(&self) -> bool {
    let last_row = self.padded.nrows() - 1;
    let last_col = self.padded.ncols() - 1;
    let dead = |view: ArrayView1<Cell>| view.iter().all(|&c| c == DEAD);
    dead(self.padded.row(0))
      && dead(self.padded.row(last_row))
      && dead(self.padded.column(0))
      && dead(self.padded.column(last_col))
  }

  /// Copy of the logical board as nested rows.
  pub fn to_rows(&self) -> Vec<Vec<Cell>> {
    self.cells().rows().into_iter().map(|row| row.to_vec()).collect()
  }

  /// The logical board without the border.
  pub fn into_array(self) -> Array2<Cell> {
    self.cells().to_owned()
  }
}

fn is_cell_value(v: i64) -> bool {
  v == DEAD as i64 || v == ALIVE as i64
}

impl Display for Board {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for row in self.cells().rows() {
      writeln!(f, "{}", row.iter().join(" "))?;
    }
    Ok(())
  }
}
