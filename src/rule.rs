use std::fmt::{self, Display};

/// State of a single cell, either [`DEAD`] or [`ALIVE`].
pub type Cell = u8;

pub const DEAD: Cell = 0;
pub const ALIVE: Cell = 1;

/// Largest number of alive neighbors a cell can have.
pub const MAX_NEIGHBORS: usize = 8;

/// Lookup table from `(status, alive neighbors)` to the next status.
///
/// Row 0 is for dead cells, row 1 for alive cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
  table: [[Cell; MAX_NEIGHBORS + 1]; 2],
}

pub const GAME_OF_LIFE: Rule = Rule {
  table: [
    [0, 0, 0, 1, 0, 0, 0, 0, 0],
    [0, 0, 1, 1, 0, 0, 0, 0, 0],
  ],
};

impl Rule {
  /// Next status of a cell.
  ///
  /// Panics if `status > 1` or `neighbors > 8`; the board never stores
  /// such values.
  #[inline]
  pub fn next(&self, status: Cell, neighbors: u8) -> Cell {
    self.table[status as usize][neighbors as usize]
  }

  pub fn row(&self, status: Cell) -> &[Cell; MAX_NEIGHBORS + 1] {
    &self.table[status as usize]
  }

  fn counts(&self, status: Cell) -> impl Iterator<Item = usize> + '_ {
    self.row(status)
      .iter()
      .enumerate()
      .filter(|&(_, &next)| next == ALIVE)
      .map(|(n, _)| n)
  }
}

impl Default for Rule {
  fn default() -> Self {
    GAME_OF_LIFE
  }
}

impl Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "B")?;
    for n in self.counts(DEAD) {
      write!(f, "{}", n)?;
    }
    write!(f, "/S")?;
    for n in self.counts(ALIVE) {
      write!(f, "{}", n)?;
    }
    Ok(())
  }
}
