use crate::board::Board;
use crate::rule::*;
use log::debug;
use ndarray::prelude::*;
use ndarray::Zip;

/// Advances a [`Board`] one generation at a time.
///
/// Neighbor counts and next states are written to buffers owned by the
/// stepper, and the board is only overwritten once both passes are done, so
/// every cell of a generation reads the same snapshot.
#[derive(Debug, Clone)]
pub struct Stepper {
  counts: Array2<u8>,
  next: Array2<Cell>,
  parallel: bool,
}

impl Stepper {
  pub fn new(shape: (usize, usize)) -> Self {
    Self {
      counts: Array2::zeros(shape),
      next: Array2::zeros(shape),
      parallel: false,
    }
  }

  pub fn for_board(board: &Board) -> Self {
    Self::new(board.shape())
  }

  /// Compute counts and next states on the rayon thread pool.
  pub fn parallel(mut self, parallel: bool) -> Self {
    self.parallel = parallel;
    self
  }

  pub fn is_parallel(&self) -> bool {
    self.parallel
  }

  /// Alive-neighbor counts from the last step.
  pub fn counts(&self) -> ArrayView2<'_, u8> {
    self.counts.view()
  }

  pub fn step(&mut self, board: &mut Board) {
    if self.counts.dim() != board.shape() {
      debug!("resizing step buffers to {:?}", board.shape());
      *self = Self::for_board(board).parallel(self.parallel);
    }

    let cells = board.cells();

    let counting = Zip::from(&mut self.counts)
      .and(board.all_neighbor_windows())
      .and(&cells);
    if self.parallel {
      counting.par_for_each(count_neighbors);
    } else {
      counting.for_each(count_neighbors);
    }

    let rule = GAME_OF_LIFE;
    let updating = Zip::from(&mut self.next).and(&cells).and(&self.counts);
    if self.parallel {
      updating.par_for_each(|next, &cell, &n| *next = rule.next(cell, n));
    } else {
      updating.for_each(|next, &cell, &n| *next = rule.next(cell, n));
    }

    board.cells_mut().assign(&self.next);
  }
}

fn count_neighbors(count: &mut u8, window: ArrayView2<'_, Cell>, &cell: &Cell) {
  *count = window.sum() - cell;
}
