use indexmap::IndexSet;
use log::{debug, trace};
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::io;
use crate::board::Board;
use crate::report::Observer;
use crate::step::Stepper;

type FxIndexSet<T> = IndexSet<T, BuildHasherDefault<FxHasher>>;

/// Owns a board for the duration of a run and steps it generation by
/// generation.
pub struct Universe {
  board: Board,
  stepper: Stepper,
  generation: u64,
}

/// A repeated state found by [`Universe::find_cycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
  /// First generation of the repeating sequence.
  pub start: u64,
  /// `1` for still lifes.
  pub period: u64,
}

impl Universe {
  pub fn new(board: Board) -> Self {
    let stepper = Stepper::for_board(&board);
    Self {
      board,
      stepper,
      generation: 0,
    }
  }

  pub fn with_stepper(board: Board, stepper: Stepper) -> Self {
    Self {
      board,
      stepper,
      generation: 0,
    }
  }

  pub fn board(&self) -> &Board {
    &self.board
  }

  pub fn into_board(self) -> Board {
    self.board
  }

  /// Generations run so far.
  pub fn generation(&self) -> u64 {
    self.generation
  }

  pub fn step(&mut self) {
    self.stepper.step(&mut self.board);
    self.generation += 1;
    trace!("generation {}: population {}", self.generation, self.board.population());
  }

  /// `num_gen` is number of generations.
  pub fn simulate(&mut self, num_gen: usize) {
    if num_gen == 0 {
      return;
    }

    debug!("simulating {} generations from generation {}", num_gen, self.generation);
    for _ in 0..num_gen {
      self.step();
    }
  }

  /// Like [`simulate`](Self::simulate), handing the board to `observer` after
  /// every generation. Stops at the first observer error.
  pub fn simulate_with<O>(&mut self, num_gen: usize, observer: &mut O) -> io::Result<()>
  where
    O: Observer + ?Sized,
  {
    debug!("simulating {} generations from generation {}", num_gen, self.generation);
    for _ in 0..num_gen {
      self.step();
      observer.observe(self.generation, &self.board)?;
    }
    Ok(())
  }

  /// Step until a board state repeats, for at most `max_gen` generations.
  pub fn find_cycle(&mut self, max_gen: usize) -> Option<Cycle> {
    let offset = self.generation;
    let mut seen = FxIndexSet::default();
    seen.insert(self.board.clone());

    for _ in 0..max_gen {
      self.step();
      let (index, new) = seen.insert_full(self.board.clone());
      if !new {
        let start = offset + index as u64;
        let cycle = Cycle { start, period: self.generation - start };
        debug!("found cycle {:?}", cycle);
        return Some(cycle);
      }
    }

    None
  }
}

/// Run `board` for `num_gen` generations and hand it back.
pub fn run(board: Board, num_gen: usize) -> Board {
  let mut uni = Universe::new(board);
  uni.simulate(num_gen);
  uni.into_board()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::report::Reporter;
  use ndarray::array;
  use pretty_assertions::assert_eq;

  fn blinker() -> Board {
    Board::new(&array![[0, 1, 0], [0, 1, 0], [0, 1, 0]]).unwrap()
  }

  #[test]
  fn zero_generations() {
    let mut uni = Universe::new(blinker());
    uni.simulate(0);
    assert_eq!(uni.generation(), 0);
    assert_eq!(uni.board(), &blinker());
  }

  #[test]
  fn blinker_period() {
    let mut uni = Universe::new(blinker());
    uni.simulate(1);
    assert_eq!(uni.board().cells(), array![[0, 0, 0], [1, 1, 1], [0, 0, 0]]);
    uni.simulate(1);
    assert_eq!(uni.board(), &blinker());
    assert_eq!(uni.generation(), 2);
  }

  #[test]
  fn observer_sees_every_generation() {
    let mut seen = vec![];
    let mut uni = Universe::new(blinker());
    uni.simulate_with(3, &mut |generation: u64, board: &Board| {
      seen.push((generation, board.get(0, 1)));
    }).unwrap();
    assert_eq!(seen, vec![(1, Some(0)), (2, Some(1)), (3, Some(0))]);
  }

  #[test]
  fn reporter_through_universe() {
    let mut reporter = Reporter::new(Vec::new());
    let mut uni = Universe::new(blinker());
    uni.simulate_with(1, &mut reporter).unwrap();
    let text = String::from_utf8(reporter.into_inner()).unwrap();
    assert_eq!(text, "generation 1:\n0 0 0\n1 1 1\n0 0 0\n\n");
  }

  #[test]
  fn steps_compose() {
    let mut stepped = Universe::new(blinker());
    for _ in 0..5 {
      stepped.simulate(1);
    }
    assert_eq!(stepped.board(), &run(blinker(), 5));
  }

  #[test]
  fn cycle_of_blinker() {
    let mut uni = Universe::new(blinker());
    assert_eq!(uni.find_cycle(10), Some(Cycle { start: 0, period: 2 }));
    assert_eq!(uni.generation(), 2);
  }

  #[test]
  fn cycle_of_dying_pattern() {
    // A lone cell dies, then the empty board repeats.
    let board = Board::new(&array![[0, 0, 0], [0, 1, 0], [0, 0, 0]]).unwrap();
    let mut uni = Universe::new(board);
    assert_eq!(uni.find_cycle(10), Some(Cycle { start: 1, period: 1 }));
  }

  #[test]
  fn no_cycle_within_limit() {
    let mut uni = Universe::new(blinker());
    assert_eq!(uni.find_cycle(1), None);
    assert_eq!(uni.generation(), 1);
  }
}
