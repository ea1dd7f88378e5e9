//! Error types for resin-spectral.

use thiserror::Error;

/// Errors that can occur while building or rendering a spectrum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpectralError {
    /// The grid does not hold a power-of-two number of samples.
    #[error("invalid dimensions: {width}x{height} is not a power-of-two sample count")]
    InvalidDimensions {
        /// Grid width in pixels.
        width: usize,
        /// Grid height in pixels.
        height: usize,
    },

    /// Pixel index outside the buffer.
    #[error("pixel index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        /// Requested pixel index.
        index: usize,
        /// Number of pixels in the buffer.
        len: usize,
    },

    /// Raw byte buffer has the wrong length for its dimensions.
    #[error("buffer size mismatch: expected {expected} bytes, got {got}")]
    BufferSize {
        /// Byte length implied by width * height * 4.
        expected: usize,
        /// Byte length actually supplied.
        got: usize,
    },

    /// Log gain is not a positive finite number.
    #[error("invalid log gain {gain}: must be positive and finite")]
    InvalidLogGain {
        /// The rejected gain.
        gain: f64,
    },

    /// Division by a complex number with zero magnitude.
    #[error("complex division by zero")]
    ComplexDivisionByZero,
}

impl SpectralError {
    /// Create an invalid-dimensions error.
    pub fn dimensions(width: usize, height: usize) -> Self {
        Self::InvalidDimensions { width, height }
    }
}
