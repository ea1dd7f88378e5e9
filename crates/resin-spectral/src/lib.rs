//! FFT-based frequency spectrum images.
//!
//! This crate turns one channel of an image into a picture of its frequency
//! spectrum:
//! - [`Complex`] - double-precision complex arithmetic
//! - [`fft_real`] / [`fft_complex`] / [`fft2d`] - radix-2 Cooley-Tukey transforms
//! - [`half_shift`] / [`flip_left_half`] / [`fft_shift`] - display reordering
//! - [`log_intensities`] / [`render_magnitudes`] - log-compressed rendering
//! - [`PixelStore`] / [`PixelBuffer`] - channel-addressable RGBA storage
//! - [`SpectrumView`] - the whole pipeline as one serializable operation
//!
//! # Example
//!
//! ```
//! use rhizome_resin_spectral::{Channel, PixelBuffer, SpectrumLayout, SpectrumView};
//!
//! let mut image = PixelBuffer::new(8, 8);
//! for y in 0..8 {
//!     for x in 0..8 {
//!         let stripe = if x % 2 == 0 { 255 } else { 0 };
//!         image.set_channel_at(stripe, x, y, Channel::Grayscale).unwrap();
//!     }
//! }
//!
//! let view = SpectrumView::new(Channel::Grayscale).with_layout(SpectrumLayout::Flattened);
//! let spectrum = view.apply(&image).unwrap();
//! assert_eq!(spectrum.dimensions(), (8, 8));
//! ```

mod complex;
mod error;
mod fft;
mod pipeline;
mod pixel;
mod reorder;
mod render;

pub use complex::Complex;
pub use error::SpectralError;
pub use fft::{check_dimensions, fft_complex, fft_real, fft2d};
pub use pipeline::{SpectrumLayout, SpectrumView};
pub use pixel::{Channel, PixelBuffer, PixelStore};
pub use reorder::{fft_shift, flip_left_half, half_shift};
pub use render::{
    DEFAULT_LOG_GAIN, check_log_gain, log_intensities, peak_magnitude, render_magnitudes,
};
