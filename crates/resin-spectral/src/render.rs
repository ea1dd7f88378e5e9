//! Log-compressed magnitude rendering.

use crate::{Channel, Complex, PixelBuffer, PixelStore, SpectralError};

/// Default gain applied to magnitudes before `ln(1 + gain·m)`.
pub const DEFAULT_LOG_GAIN: f64 = 9e-3;

/// Largest magnitude in `data`, or 0 for an empty slice.
pub fn peak_magnitude(data: &[Complex]) -> f64 {
    data.iter().map(Complex::mag).fold(0.0, f64::max)
}

/// Rejects gains that would collapse `ln(1 + gain·peak)` to zero or NaN.
pub fn check_log_gain(log_gain: f64) -> Result<(), SpectralError> {
    if log_gain > 0.0 && log_gain.is_finite() {
        Ok(())
    } else {
        Err(SpectralError::InvalidLogGain { gain: log_gain })
    }
}

/// Maps every magnitude to an intensity in `0..=255`.
///
/// Intensity is `255 · ln(1 + gain·m) / ln(1 + gain·peak)`, truncated. A zero
/// peak yields all zeros.
pub fn log_intensities(data: &[Complex], log_gain: f64) -> Result<Vec<u8>, SpectralError> {
    check_log_gain(log_gain)?;
    let peak = peak_magnitude(data);
    if peak == 0.0 {
        return Ok(vec![0; data.len()]);
    }

    let ceiling = (log_gain * peak + 1.0).ln();
    let intensities = data
        .iter()
        .map(|c| {
            let level = (log_gain * c.mag() + 1.0).ln();
            (255.0 * (level / ceiling)) as u8
        })
        .collect();
    Ok(intensities)
}

/// Renders `data` as an opaque grayscale `width × height` image.
pub fn render_magnitudes(
    data: &[Complex],
    width: usize,
    height: usize,
    log_gain: f64,
) -> Result<PixelBuffer, SpectralError> {
    if data.len() != width * height {
        return Err(SpectralError::BufferSize {
            expected: width * height,
            got: data.len(),
        });
    }

    let mut out = PixelBuffer::new(width, height);
    for (index, value) in log_intensities(data, log_gain)?.into_iter().enumerate() {
        out.set_channel_value(value, index, Channel::Grayscale)?;
    }
    Ok(out)
}
