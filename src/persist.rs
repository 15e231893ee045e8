//! Loading and saving boards, with the format picked from the file extension.

use crate::board::Board;
use crate::error::InvalidBoardError;
use crate::export;
use crate::rle::{self, RleError};
use crate::rule::*;
use itertools::Itertools;
use log::{debug, info};
use ndarray::Array2;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
  #[error("could not access {}: {source}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
  #[error(transparent)]
  Json(#[from] serde_json::Error),
  #[error(transparent)]
  Rle(#[from] RleError),
  #[error(transparent)]
  Image(#[from] image::ImageError),
  #[error(transparent)]
  Board(#[from] InvalidBoardError),
  #[error("invalid character {ch:?} on line {line} of plaintext pattern")]
  Plaintext { line: usize, ch: char },
  #[error("unsupported board file {}", .0.display())]
  UnsupportedFormat(PathBuf),
  #[error("{0:?} boards are not stored as text")]
  NotText(Format),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
  /// Run Length Encoded pattern.
  Rle,
  /// Nested array of integers.
  Json,
  /// Plaintext pattern, `.` dead and `O` alive.
  Cells,
  /// One pixel per cell, alive cells white.
  Image,
}

impl Format {
  pub fn from_path(path: &Path) -> Option<Self> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
      "rle" => Some(Self::Rle),
      "json" => Some(Self::Json),
      "cells" | "txt" => Some(Self::Cells),
      "png" | "bmp" => Some(Self::Image),
      _ => None,
    }
  }

  /// Parse a text format. Images are not text and always fail.
  pub fn parse(self, src: &str) -> Result<Board, PersistError> {
    match self {
      Self::Rle => Ok(Board::new(&rle::read(src)?)?),
      Self::Json => parse_json(src),
      Self::Cells => parse_cells(src),
      Self::Image => Err(PersistError::NotText(self)),
    }
  }

  pub fn render(self, board: &Board) -> Result<String, PersistError> {
    match self {
      Self::Rle => Ok(rle::write(board)),
      Self::Json => Ok(serde_json::to_string(&board.to_rows())? + "\n"),
      Self::Cells => Ok(write_cells(board)),
      Self::Image => Err(PersistError::NotText(self)),
    }
  }
}

fn format_of(path: &Path) -> Result<Format, PersistError> {
  Format::from_path(path).ok_or_else(|| PersistError::UnsupportedFormat(path.to_owned()))
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> PersistError + '_ {
  move |source| PersistError::Io { path: path.to_owned(), source }
}

pub fn load_board(path: impl AsRef<Path>) -> Result<Board, PersistError> {
  let path = path.as_ref();
  let format = format_of(path)?;
  let board = match format {
    Format::Image => load_image(path)?,
    _ => {
      let src = fs::read_to_string(path).map_err(io_error(path))?;
      format.parse(&src)?
    }
  };
  info!("loaded {}x{} board from {}", board.rows(), board.cols(), path.display());
  Ok(board)
}

pub fn save_board(board: &Board, path: impl AsRef<Path>) -> Result<(), PersistError> {
  let path = path.as_ref();
  match format_of(path)? {
    Format::Image => export::save_image(board, path, 1)?,
    format => {
      let text = format.render(board)?;
      fs::write(path, text).map_err(io_error(path))?;
    }
  }
  info!("saved {}x{} board to {}", board.rows(), board.cols(), path.display());
  Ok(())
}

/// Accepts only a rectangular array of integer arrays.
fn parse_json(src: &str) -> Result<Board, PersistError> {
  let value: Value = serde_json::from_str(src)?;
  let rows = match value {
    Value::Array(rows) => rows,
    other => {
      return Err(InvalidBoardError::invalid_type(format!("expected rows, got {}", other)).into());
    }
  };

  let mut grid = Vec::with_capacity(rows.len());
  for (r, row) in rows.iter().enumerate() {
    let row = row
      .as_array()
      .ok_or_else(|| InvalidBoardError::invalid_type(format!("row {} is not an array", r)))?;
    let cells = row
      .iter()
      .enumerate()
      .map(|(c, v)| {
        v.as_i64().ok_or_else(|| {
          InvalidBoardError::invalid_type(format!("cell ({}, {}) is not an integer: {}", r, c, v))
        })
      })
      .collect::<Result<Vec<i64>, _>>()?;
    grid.push(cells);
  }

  debug!("parsed json grid with {} rows", grid.len());
  Ok(Board::from_rows(&grid)?)
}

fn parse_cells(src: &str) -> Result<Board, PersistError> {
  let mut rows = vec![];
  for (i, line) in src.lines().enumerate() {
    if line.starts_with('!') {
      continue;
    }
    let row = line
      .trim_end()
      .chars()
      .map(|ch| match ch {
        '.' => Ok(DEAD),
        'O' | '*' => Ok(ALIVE),
        _ => Err(PersistError::Plaintext { line: i + 1, ch }),
      })
      .collect::<Result<Vec<Cell>, _>>()?;
    rows.push(row);
  }

  let width = rows.iter().map(Vec::len).max().unwrap_or(0);
  for row in &mut rows {
    row.resize(width, DEAD);
  }
  Ok(Board::from_rows(&rows)?)
}

fn write_cells(board: &Board) -> String {
  board
    .cells()
    .rows()
    .into_iter()
    .map(|row| {
      row
        .iter()
        .map(|&c| if c == ALIVE { 'O' } else { '.' })
        .collect::<String>()
    })
    .join("\n")
    + "\n"
}

fn load_image(path: &Path) -> Result<Board, PersistError> {
  let img = image::open(path)?.to_luma8();
  let (width, height) = img.dimensions();
  let grid = Array2::from_shape_fn((height as usize, width as usize), |(r, c)| {
    (img.get_pixel(c as u32, r as u32)[0] > u8::MAX / 2) as Cell
  });
  Ok(Board::new(&grid)?)
}
