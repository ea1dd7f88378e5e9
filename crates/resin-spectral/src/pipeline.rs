//! The channel-to-spectrum-image operation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::fft::{check_dimensions, fft_real, fft2d};
use crate::reorder::{fft_shift, flip_left_half, half_shift};
use crate::render::{DEFAULT_LOG_GAIN, check_log_gain, peak_magnitude, render_magnitudes};
use crate::{Channel, Complex, PixelBuffer, PixelStore, SpectralError};

/// How the transform output is arranged for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SpectrumLayout {
    /// One 1D transform over the row-major flattened grid, folded twice with
    /// [`half_shift`] and mirrored with [`flip_left_half`].
    #[default]
    Flattened,
    /// Row-then-column 2D transform with a quadrant [`fft_shift`].
    Separable,
}

impl std::str::FromStr for SpectrumLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flattened" | "flat" => Ok(SpectrumLayout::Flattened),
            "separable" | "2d" => Ok(SpectrumLayout::Separable),
            other => Err(format!("unknown layout: {other}")),
        }
    }
}

/// Renders one channel of an image as its log-scaled magnitude spectrum.
///
/// Operations are serializable structs with `apply` methods.
///
/// # Example
///
/// ```
/// use rhizome_resin_spectral::{Channel, PixelBuffer, PixelStore, SpectrumView};
///
/// let image = PixelBuffer::from_luma(2, 2, &[10, 20, 30, 40]).unwrap();
/// let spectrum = SpectrumView::default().apply(&image).unwrap();
///
/// assert_eq!(spectrum.dimensions(), (2, 2));
/// assert_eq!(spectrum.channel_value(3, Channel::Red).unwrap(), 255);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpectrumView {
    /// Channel sampled from the source image.
    pub channel: Channel,
    /// Display arrangement of the transformed data.
    pub layout: SpectrumLayout,
    /// Gain applied to magnitudes before log compression.
    pub log_gain: f64,
}

impl Default for SpectrumView {
    fn default() -> Self {
        Self {
            channel: Channel::Grayscale,
            layout: SpectrumLayout::Flattened,
            log_gain: DEFAULT_LOG_GAIN,
        }
    }
}

impl SpectrumView {
    /// Creates a view of the given channel with default settings.
    pub fn new(channel: Channel) -> Self {
        Self {
            channel,
            ..Self::default()
        }
    }

    /// Sets the sampled channel.
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    /// Sets the display layout.
    pub fn with_layout(mut self, layout: SpectrumLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the log compression gain.
    pub fn with_log_gain(mut self, log_gain: f64) -> Self {
        self.log_gain = log_gain;
        self
    }

    /// Checks settings that deserialization and the builders accept unchecked.
    pub fn validate(&self) -> Result<(), SpectralError> {
        check_log_gain(self.log_gain)
    }

    /// Computes the reordered complex spectrum without rendering it.
    pub fn spectrum<S: PixelStore + ?Sized>(&self, store: &S) -> Result<Vec<Complex>, SpectralError> {
        let (width, height) = (store.width(), store.height());
        let len = check_dimensions(width, height)?;

        let samples = (0..len)
            .map(|i| store.channel_value(i, self.channel).map(f64::from))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(width, height, channel = ?self.channel, layout = ?self.layout, "transforming");

        let spectrum = match self.layout {
            SpectrumLayout::Flattened => {
                let transformed = fft_real(&samples)?;
                trace!(dc = %transformed[0], "flattened transform done");
                let folded = half_shift(&transformed, width, height);
                let folded = half_shift(&folded, width, height);
                flip_left_half(&folded, width, height)
            }
            SpectrumLayout::Separable => {
                let transformed = fft2d(&samples, width, height)?;
                trace!(dc = %transformed[0], "separable transform done");
                fft_shift(&transformed, width, height)
            }
        };
        Ok(spectrum)
    }

    /// Applies this operation, producing an opaque grayscale image.
    pub fn apply<S: PixelStore + ?Sized>(&self, store: &S) -> Result<PixelBuffer, SpectralError> {
        self.validate()?;
        let spectrum = self.spectrum(store)?;
        debug!(peak = peak_magnitude(&spectrum), "rendering spectrum");
        render_magnitudes(&spectrum, store.width(), store.height(), self.log_gain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_2x2() -> PixelBuffer {
        PixelBuffer::from_luma(2, 2, &[10, 20, 30, 40]).unwrap()
    }

    #[test]
    fn test_end_to_end_2x2() {
        let view = SpectrumView::default();

        let spectrum = view.spectrum(&gray_2x2()).unwrap();
        let expected = [
            Complex::new(-20.0, 20.0),
            Complex::new(-20.0, 0.0),
            Complex::new(-20.0, -20.0),
            Complex::new(100.0, 0.0),
        ];
        for (got, want) in spectrum.iter().zip(&expected) {
            assert!((*got - *want).mag() < 1e-9, "Mismatch: {} vs {}", got, want);
        }

        let image = view.apply(&gray_2x2()).unwrap();
        assert_eq!(
            image.as_bytes(),
            &[
                90, 90, 90, 255, //
                65, 65, 65, 255, //
                90, 90, 90, 255, //
                255, 255, 255, 255,
            ]
        );
    }

    #[test]
    fn test_channel_selection() {
        let mut image = PixelBuffer::new(2, 2);
        image.set_channel_value(80, 0, Channel::Blue).unwrap();

        let red = SpectrumView::new(Channel::Red).apply(&image).unwrap();
        assert!(red.as_bytes().chunks(4).all(|p| p == [0, 0, 0, 255]));

        // A single impulse has a flat spectrum.
        let blue = SpectrumView::new(Channel::Blue).apply(&image).unwrap();
        assert!(blue.as_bytes().chunks(4).all(|p| p == [255, 255, 255, 255]));
    }

    #[test]
    fn test_uniform_image_peaks_once() {
        let image = PixelBuffer::from_luma(4, 4, &[50; 16]).unwrap();
        let out = SpectrumView::default().apply(&image).unwrap();
        let bright: Vec<usize> = (0..16)
            .filter(|&i| out.channel_value(i, Channel::Red).unwrap() == 255)
            .collect();
        // DC lands at index 0 before reordering; the 4x4 display order moves
        // source index 0 to position 10.
        assert_eq!(bright, vec![10]);
    }

    #[test]
    fn test_separable_layout_centers_dc() {
        let image = PixelBuffer::from_luma(4, 4, &[50; 16]).unwrap();
        let out = SpectrumView::default()
            .with_layout(SpectrumLayout::Separable)
            .apply(&image)
            .unwrap();
        for i in 0..16 {
            let expected = if i == 2 * 4 + 2 { 255 } else { 0 };
            assert_eq!(out.channel_value(i, Channel::Green).unwrap(), expected);
        }
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        let image = PixelBuffer::new(3, 2);
        assert_eq!(
            SpectrumView::default().apply(&image),
            Err(SpectralError::InvalidDimensions {
                width: 3,
                height: 2
            })
        );
        assert!(SpectrumView::default().apply(&PixelBuffer::new(0, 0)).is_err());
    }

    #[test]
    fn test_single_pixel() {
        let image = PixelBuffer::from_luma(1, 1, &[77]).unwrap();
        let out = SpectrumView::default().apply(&image).unwrap();
        assert_eq!(out.as_bytes(), &[255, 255, 255, 255]);
    }

    #[test]
    fn test_rejects_degenerate_gain() {
        for gain in [0.0, -1.0, f64::NAN] {
            let view = SpectrumView::default().with_log_gain(gain);
            assert!(view.validate().is_err());
            assert!(matches!(
                view.apply(&gray_2x2()),
                Err(SpectralError::InvalidLogGain { .. })
            ));
        }
        assert_eq!(SpectrumView::default().validate(), Ok(()));
    }

    #[test]
    fn test_builder_and_parse() {
        let view = SpectrumView::new(Channel::Alpha)
            .with_layout(SpectrumLayout::Separable)
            .with_log_gain(0.5)
            .with_channel(Channel::Green);
        assert_eq!(view.channel, Channel::Green);
        assert_eq!(view.layout, SpectrumLayout::Separable);
        assert_eq!(view.log_gain, 0.5);
        assert_eq!("2d".parse::<SpectrumLayout>(), Ok(SpectrumLayout::Separable));
        assert!("polar".parse::<SpectrumLayout>().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_config() {
        let view: SpectrumView =
            serde_json::from_str(r#"{"channel": "blue", "layout": "separable"}"#).unwrap();
        assert_eq!(view.channel, Channel::Blue);
        assert_eq!(view.layout, SpectrumLayout::Separable);
        assert_eq!(view.log_gain, DEFAULT_LOG_GAIN);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_config_zero_gain_is_rejected() {
        let view: SpectrumView = serde_json::from_str(r#"{"log_gain": 0.0}"#).unwrap();
        assert_eq!(
            view.apply(&gray_2x2()),
            Err(SpectralError::InvalidLogGain { gain: 0.0 })
        );
    }
}
