use crate::board::Board;
use crate::rule::*;
use image::{GrayImage, ImageResult, Luma};
use std::path::Path;

const ALIVE_PIXEL: Luma<u8> = Luma([0xff]);
const DEAD_PIXEL: Luma<u8> = Luma([0x00]);

/// Render the logical board, each cell a `scale` x `scale` square.
pub fn to_image(board: &Board, scale: u32) -> GrayImage {
  let scale = scale.max(1);
  let cells = board.cells();
  let (rows, cols) = board.shape();
  GrayImage::from_fn(cols as u32 * scale, rows as u32 * scale, |x, y| {
    if cells[[(y / scale) as usize, (x / scale) as usize]] == ALIVE {
      ALIVE_PIXEL
    } else {
      DEAD_PIXEL
    }
  })
}

/// The image format follows the extension of `path`.
pub fn save_image(board: &Board, path: impl AsRef<Path>, scale: u32) -> ImageResult<()> {
  to_image(board, scale).save(path)
}
