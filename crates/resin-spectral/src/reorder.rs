//! Display reordering of transformed grids.
//!
//! All functions take a row-major `width × height` grid and return a new grid
//! of the same length.

/// Folds rows around the horizontal midline, left half first.
///
/// Rows are visited in the order `h/2, 0, h/2+1, 1, ...`. The left half of
/// every visited row is emitted, then the visit restarts at `h/2` and emits the
/// right halves. The result is two stacked `width/2 × height` blocks.
pub fn half_shift<T: Copy>(data: &[T], width: usize, height: usize) -> Vec<T> {
    assert_eq!(data.len(), width * height);

    let mut out = Vec::with_capacity(data.len());
    for cols in [0..width / 2, width / 2..width] {
        let mut row = height / 2;
        for _ in 0..height {
            let start = row * width;
            out.extend_from_slice(&data[start + cols.start..start + cols.end]);
            row = next_folded_row(row, height);
        }
    }
    out
}

fn next_folded_row(row: usize, height: usize) -> usize {
    let mid = height / 2;
    if row >= mid { row - mid } else { row + mid + 1 }
}

/// Mirrors the left half of the grid vertically, leaving the right half as is.
pub fn flip_left_half<T: Copy>(data: &[T], width: usize, height: usize) -> Vec<T> {
    assert_eq!(data.len(), width * height);

    let mut out = Vec::with_capacity(data.len());
    for y in 0..height {
        for x in 0..width {
            let src_row = if x < width / 2 { height - 1 - y } else { y };
            out.push(data[src_row * width + x]);
        }
    }
    out
}

/// Shifts zero frequency to center (for visualization).
///
/// Swaps quadrants: top-left ↔ bottom-right, top-right ↔ bottom-left.
pub fn fft_shift<T: Copy>(data: &[T], width: usize, height: usize) -> Vec<T> {
    assert_eq!(data.len(), width * height);

    let half_w = width / 2;
    let half_h = height / 2;

    let mut out = data.to_vec();
    for y in 0..height {
        for x in 0..width {
            let dst = ((y + half_h) % height) * width + (x + half_w) % width;
            out[dst] = data[y * width + x];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn test_half_shift_small() {
        assert_eq!(half_shift(&indices(4), 2, 2), vec![2, 0, 3, 1]);
        assert_eq!(half_shift(&indices(8), 2, 4), vec![4, 0, 6, 2, 5, 1, 7, 3]);
        assert_eq!(half_shift(&indices(8), 4, 2), vec![4, 5, 0, 1, 6, 7, 2, 3]);
    }

    #[test]
    fn test_half_shift_4x4() {
        assert_eq!(
            half_shift(&indices(16), 4, 4),
            vec![8, 9, 0, 1, 12, 13, 4, 5, 10, 11, 2, 3, 14, 15, 6, 7]
        );
    }

    #[test]
    fn test_double_half_shift_4x4() {
        let once = half_shift(&indices(16), 4, 4);
        assert_eq!(
            half_shift(&once, 4, 4),
            vec![10, 11, 8, 9, 14, 15, 12, 13, 2, 3, 0, 1, 6, 7, 4, 5]
        );
    }

    #[test]
    fn test_half_shift_is_permutation() {
        let mut out = half_shift(&indices(64), 8, 8);
        out.sort_unstable();
        assert_eq!(out, indices(64));
    }

    #[test]
    fn test_flip_left_half() {
        // 4x2: left columns swap rows, right columns stay.
        assert_eq!(
            flip_left_half(&indices(8), 4, 2),
            vec![4, 5, 2, 3, 0, 1, 6, 7]
        );
    }

    #[test]
    fn test_full_display_order_4x4() {
        let twice = half_shift(&half_shift(&indices(16), 4, 4), 4, 4);
        assert_eq!(
            flip_left_half(&twice, 4, 4),
            vec![6, 7, 8, 9, 2, 3, 12, 13, 14, 15, 0, 1, 10, 11, 4, 5]
        );
    }

    #[test]
    fn test_fft_shift() {
        assert_eq!(
            fft_shift(&indices(16), 4, 4),
            vec![10, 11, 8, 9, 14, 15, 12, 13, 2, 3, 0, 1, 6, 7, 4, 5]
        );
        // Single row only shifts horizontally.
        assert_eq!(fft_shift(&indices(4), 4, 1), vec![2, 3, 0, 1]);
    }
}
