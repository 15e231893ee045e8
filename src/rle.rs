use crate::board::Board;
use crate::rule::*;
use itertools::Itertools;
use lazy_static::lazy_static;
use ndarray::{s, Array2};
use regex::Regex;
use thiserror::Error;

/// Longest line the writer produces.
const MAX_LINE_LEN: usize = 70;

/// Largest pattern the reader allocates, in cells (an 8192x8192 board).
pub const MAX_CELLS: usize = 1 << 26;

lazy_static! {
  static ref HEADER_RE: Regex = Regex::new(
    r"^x\s*=\s*(\d+)\s*,\s*y\s*=\s*(\d+)\s*(?:,\s*rule\s*=\s*(\S+))?\s*$",
  ).unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RleError {
  #[error("missing header line")]
  MissingHeader,
  #[error("invalid header line {0:?}")]
  InvalidHeader(String),
  #[error("unsupported rule {0:?}, only B3/S23 is supported")]
  UnsupportedRule(String),
  #[error("pattern size {width}x{height} exceeds {} cells", MAX_CELLS)]
  TooLarge { width: usize, height: usize },
  #[error("invalid run count {0:?}")]
  InvalidCount(String),
  #[error("invalid character {0:?}")]
  InvalidChar(char),
  #[error("cell ({x}, {y}) is outside the declared pattern size")]
  OutOfBounds { x: usize, y: usize },
  #[error("unexpected end of input, missing '!'")]
  UnexpectedEof,
}

/// Read a bounded Life pattern from a RLE string.
///
/// The header's `x` and `y` are the exact width and height of the grid, at
/// most [`MAX_CELLS`] cells in total. Runs reaching past that size are
/// rejected.
///
/// RLE format: <https://www.conwaylife.com/wiki/Run_Length_Encoded>.
pub fn read(src: impl AsRef<str>) -> Result<Array2<Cell>, RleError> {
  let mut lines = src
    .as_ref()
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty() && !line.starts_with('#'));

  let header = lines.next().ok_or(RleError::MissingHeader)?;
  let caps = HEADER_RE
    .captures(header)
    .ok_or_else(|| RleError::InvalidHeader(header.to_owned()))?;
  let width = parse_count(&caps[1])?;
  let height = parse_count(&caps[2])?;
  if let Some(rule) = caps.get(3) {
    if !is_game_of_life(rule.as_str()) {
      return Err(RleError::UnsupportedRule(rule.as_str().to_owned()));
    }
  }
  match width.checked_mul(height) {
    Some(cells) if cells <= MAX_CELLS => {}
    _ => return Err(RleError::TooLarge { width, height }),
  }

  let mut grid = Array2::<Cell>::zeros((height, width));
  let mut x = 0;
  let mut y = 0;
  let mut num: Option<String> = None;
  for c in lines.flat_map(str::chars) {
    if c.is_ascii_digit() {
      num.get_or_insert_with(String::new).push(c);
      continue;
    }
    if c.is_whitespace() {
      continue;
    }

    let n = match num.take() {
      Some(digits) => parse_count(&digits)?,
      None => 1,
    };
    let out_of_bounds = |x: usize, y: usize| RleError::OutOfBounds {
      x: x.saturating_add(n).saturating_sub(1),
      y,
    };
    match c {
      'b' => {
        x = advance(x, n, width).ok_or_else(|| out_of_bounds(x, y))?;
      }
      'o' => {
        if y >= height {
          return Err(out_of_bounds(x, y));
        }
        let end = advance(x, n, width).ok_or_else(|| out_of_bounds(x, y))?;
        grid.slice_mut(s![y, x..end]).mapv_inplace(|_| ALIVE);
        x = end;
      }
      '$' => {
        y = advance(y, n, height).ok_or(RleError::OutOfBounds { x: 0, y: y.saturating_add(n) })?;
        x = 0;
      }
      '!' => return Ok(grid),
      _ => return Err(RleError::InvalidChar(c)),
    }
  }

  Err(RleError::UnexpectedEof)
}

/// `pos + n` if it stays within `limit`.
fn advance(pos: usize, n: usize, limit: usize) -> Option<usize> {
  pos.checked_add(n).filter(|&end| end <= limit)
}

fn parse_count(digits: &str) -> Result<usize, RleError> {
  digits
    .parse()
    .map_err(|_| RleError::InvalidCount(digits.to_owned()))
}

fn is_game_of_life(rule: &str) -> bool {
  let rule = rule.to_ascii_uppercase();
  rule == GAME_OF_LIFE.to_string() || rule == "23/3"
}

/// Write a board to a RLE string.
///
/// Trailing dead cells of a row are omitted and consecutive row breaks are
/// merged, the header keeps the full board size.
///
/// RLE format: <https://www.conwaylife.com/wiki/Run_Length_Encoded>.
pub fn write(board: &Board) -> String {
  let (rows, cols) = board.shape();
  let mut output = format!("x = {}, y = {}, rule = {}\n", cols, rows, GAME_OF_LIFE);

  let mut num_next_rows = 0;
  for (i, row) in board.cells().rows().into_iter().enumerate() {
    if i > 0 {
      num_next_rows += 1;
    }

    let groups = row.iter().group_by(|&&c| c);
    let mut runs = (&groups)
      .into_iter()
      .map(|(c, run)| (c, run.count()))
      .collect::<Vec<_>>();
    if let Some(&(DEAD, _)) = runs.last() {
      runs.pop();
    }
    if runs.is_empty() {
      continue;
    }

    if num_next_rows > 0 {
      RleUnit::NextRow.write(num_next_rows, &mut output);
      num_next_rows = 0;
    }
    for (c, num) in runs {
      let unit = if c == ALIVE { RleUnit::Alive } else { RleUnit::Dead };
      unit.write(num, &mut output);
    }
  }

  output.push('!');
  output.push('\n');
  output
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum RleUnit {
  Dead,
  Alive,
  NextRow,
}

impl RleUnit {
  fn write(&self, num: usize, s: &mut String) {
    let c = match self {
      Self::Dead => 'b',
      Self::Alive => 'o',
      Self::NextRow => '$',
    };

    let buf = if num == 1 {
      c.to_string()
    } else {
      format!("{}{}", num, c)
    };

    let line_start = s.rfind('\n').map_or(0, |i| i + 1);
    if s.len() - line_start + buf.len() > MAX_LINE_LEN {
      s.push('\n');
    }

    s.push_str(&buf);
  }
}
