//! Conway's Game of Life on a bounded board with a permanently dead border.

pub mod board;
pub mod error;
pub mod export;
pub mod persist;
pub mod report;
pub mod rle;
pub mod rule;
pub mod seed;
pub mod step;
pub mod universe;

pub use board::Board;
pub use error::InvalidBoardError;
pub use report::{Observer, Reporter};
pub use rule::{Cell, Rule, ALIVE, DEAD, GAME_OF_LIFE};
pub use step::Stepper;
pub use universe::{run, Cycle, Universe};
