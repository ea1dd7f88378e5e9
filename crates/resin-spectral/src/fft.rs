//! Radix-2 Cooley-Tukey transforms.
//!
//! Two engines compute the same butterflies with the same twiddle factors:
//! a recursive decimation-in-time engine over real samples ([`fft_real`]) and
//! an iterative bit-reversal engine over complex samples ([`fft_complex`]).

use std::f64::consts::PI;

use crate::{Complex, SpectralError};

/// Returns an error unless `width * height` is a non-zero power of two.
pub fn check_dimensions(width: usize, height: usize) -> Result<usize, SpectralError> {
    match width.checked_mul(height) {
        Some(n) if n.is_power_of_two() => Ok(n),
        _ => Err(SpectralError::dimensions(width, height)),
    }
}

fn check_len(n: usize) -> Result<(), SpectralError> {
    if n.is_power_of_two() {
        Ok(())
    } else {
        Err(SpectralError::dimensions(n, 1))
    }
}

// ============================================================================
// Recursive engine
// ============================================================================

/// Computes the full DFT of a real signal with the recursive engine.
///
/// `output[k] = Σ input[j] · exp(−2πi·j·k/N)`. Input length must be a power of 2.
pub fn fft_real(signal: &[f64]) -> Result<Vec<Complex>, SpectralError> {
    check_len(signal.len())?;

    let mut out = vec![Complex::ZERO; signal.len()];
    transform(&mut out, signal, 0, 1);
    Ok(out)
}

/// Transforms `input[offset], input[offset + stride], ...` into `out`.
///
/// The even subsequence lands in the first half of `out`, the odd one in the
/// second half; the halves are disjoint borrows.
fn transform(out: &mut [Complex], input: &[f64], offset: usize, stride: usize) {
    let n = out.len();
    if n <= 1 {
        out[0] = Complex::from_real(input[offset]);
        return;
    }

    let half = n / 2;
    {
        let (even, odd) = out.split_at_mut(half);
        transform(even, input, offset, stride * 2);
        transform(odd, input, offset + stride, stride * 2);
    }
    butterfly(out, half);
}

fn butterfly(window: &mut [Complex], half: usize) {
    let n = half * 2;
    for k in 0..half {
        let twiddle = Complex::from_angle(-2.0 * PI * k as f64 / n as f64);
        let top = window[k];
        let delta = twiddle * window[k + half];
        window[k] = top + delta;
        window[k + half] = top - delta;
    }
}

// ============================================================================
// Iterative engine
// ============================================================================

/// Computes the full complex FFT.
pub fn fft_complex(signal: &[Complex]) -> Result<Vec<Complex>, SpectralError> {
    check_len(signal.len())?;

    let mut x = signal.to_vec();
    fft_in_place(&mut x);
    Ok(x)
}

/// In-place FFT: bit-reversal permutation followed by iterative butterfly passes.
pub(crate) fn fft_in_place(x: &mut [Complex]) {
    let n = x.len();
    if n <= 1 {
        return;
    }

    // Bit-reversal permutation
    let mut j = 0;
    for i in 0..n {
        if i < j {
            x.swap(i, j);
        }
        let mut m = n >> 1;
        while m >= 1 && j >= m {
            j -= m;
            m >>= 1;
        }
        j += m;
    }

    let mut len = 2;
    while len <= n {
        for start in (0..n).step_by(len) {
            butterfly(&mut x[start..start + len], len / 2);
        }
        len <<= 1;
    }
}

// ============================================================================
// 2D FFT for images
// ============================================================================

/// Computes a separable 2D FFT of a real image.
///
/// Input: row-major samples, width and height must both be powers of 2.
/// Output: complex spectrum in row-major order.
pub fn fft2d(pixels: &[f64], width: usize, height: usize) -> Result<Vec<Complex>, SpectralError> {
    if !width.is_power_of_two() || !height.is_power_of_two() || pixels.len() != width * height {
        return Err(SpectralError::dimensions(width, height));
    }

    let mut data: Vec<Complex> = pixels.iter().map(|&p| Complex::from_real(p)).collect();

    for row in data.chunks_exact_mut(width) {
        fft_in_place(row);
    }

    // FFT each column through a scratch buffer
    let mut col_buffer = vec![Complex::ZERO; height];
    for col in 0..width {
        for row in 0..height {
            col_buffer[row] = data[row * width + col];
        }
        fft_in_place(&mut col_buffer);
        for row in 0..height {
            data[row * width + col] = col_buffer[row];
        }
    }

    Ok(data)
}
