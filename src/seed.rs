use crate::rule::Cell;
use ndarray::Array2;
use rand::Rng;

/// A grid where each cell is alive with probability `density`.
///
/// `density` is clamped to `0.0..=1.0`. The grid is not validated; pass it to
/// [`Board::new`](crate::board::Board::new).
pub fn random_grid<R: Rng>(
  rows: usize,
  cols: usize,
  density: f64,
  rng: &mut R,
) -> Array2<Cell> {
  let density = if density.is_nan() { 0.0 } else { density.max(0.0).min(1.0) };
  Array2::from_shape_simple_fn((rows, cols), || rng.gen_bool(density) as Cell)
}
