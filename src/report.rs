use crate::board::Board;
use std::io::{self, Write};

/// Receives the board after every completed generation.
pub trait Observer {
  fn observe(&mut self, generation: u64, board: &Board) -> io::Result<()>;
}

impl<F> Observer for F
where
  F: FnMut(u64, &Board),
{
  fn observe(&mut self, generation: u64, board: &Board) -> io::Result<()> {
    self(generation, board);
    Ok(())
  }
}

/// Dumps each generation as text, one row of `0`s and `1`s per line.
pub struct Reporter<W> {
  out: W,
}

impl<W: Write> Reporter<W> {
  pub fn new(out: W) -> Self {
    Self { out }
  }

  pub fn into_inner(self) -> W {
    self.out
  }
}

impl<W: Write> Observer for Reporter<W> {
  fn observe(&mut self, generation: u64, board: &Board) -> io::Result<()> {
    writeln!(self.out, "generation {}:", generation)?;
    write!(self.out, "{}", board)?;
    writeln!(self.out)?;
    self.out.flush()
  }
}
