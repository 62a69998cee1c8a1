use crate::buffer::PixelBuffer;
use crate::pixel::PixelFn;
use rayon::prelude::*;

/// Rewrite every pixel of `buffer` in place with `f`, column by column.
///
/// Returns the number of coordinates visited, always `width * height`.
/// Each output depends only on the same pixel's original value, so the
/// visit order does not affect the result.
pub fn transform(buffer: &mut PixelBuffer, f: PixelFn) -> usize {
    let (width, height) = buffer.dimensions();
    let mut visited = 0;
    for x in 0..width {
        for y in 0..height {
            let original = buffer.get(x, y);
            buffer.set(x, y, f(original));
            visited += 1;
        }
    }
    visited
}

/// Same result as [`transform`], with rows split across the rayon pool.
pub fn transform_parallel(buffer: &mut PixelBuffer, f: PixelFn) -> usize {
    let width = buffer.width() as usize;
    if width == 0 || buffer.height() == 0 {
        return 0;
    }

    buffer
        .pixels_mut()
        .par_chunks_mut(width)
        .map(|row| {
            for pixel in row.iter_mut() {
                *pixel = f(*pixel);
            }
            row.len()
        })
        .sum()
}
