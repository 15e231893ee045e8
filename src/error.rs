use thiserror::Error;

/// Reasons a grid cannot become a [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidBoardError {
  /// One of the dimensions is smaller than 2.
  #[error("board must be at least 2x2, got {rows}x{cols}")]
  InvalidShape { rows: usize, cols: usize },

  /// A cell holds something other than 0 or 1.
  #[error("cell ({row}, {col}) is {value}, expected 0 or 1")]
  InvalidValue { row: usize, col: usize, value: i64 },

  /// The input is not a rectangular two-dimensional integer grid.
  #[error("board must be a two-dimensional integer grid: {0}")]
  InvalidType(String),
}

impl InvalidBoardError {
  pub(crate) fn invalid_type(reason: impl Into<String>) -> Self {
    Self::InvalidType(reason.into())
  }
}
