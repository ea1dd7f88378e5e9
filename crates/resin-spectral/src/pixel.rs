//! Channel-addressable RGBA pixel storage.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::SpectralError;

/// Bytes per RGBA pixel.
const STRIDE: usize = 4;

/// A pixel channel to read from or write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Channel {
    /// Red byte.
    Red,
    /// Green byte.
    Green,
    /// Blue byte.
    Blue,
    /// Alpha byte.
    Alpha,
    /// Luma on read; broadcast to RGB with opaque alpha on write.
    #[default]
    Grayscale,
}

impl Channel {
    /// Reads this channel from a 4-byte RGBA pixel.
    pub fn extract(self, rgba: [u8; 4]) -> u8 {
        match self {
            Channel::Red => rgba[0],
            Channel::Green => rgba[1],
            Channel::Blue => rgba[2],
            Channel::Alpha => rgba[3],
            Channel::Grayscale => luma(rgba[0], rgba[1], rgba[2]),
        }
    }

    /// Writes `value` into this channel of an RGBA pixel.
    pub fn fill(self, rgba: &mut [u8; 4], value: u8) {
        match self {
            Channel::Red => rgba[0] = value,
            Channel::Green => rgba[1] = value,
            Channel::Blue => rgba[2] = value,
            Channel::Alpha => rgba[3] = value,
            Channel::Grayscale => {
                rgba[..3].fill(value);
                rgba[3] = u8::MAX;
            }
        }
    }
}

impl std::str::FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Channel::Red),
            "green" | "g" => Ok(Channel::Green),
            "blue" | "b" => Ok(Channel::Blue),
            "alpha" | "a" => Ok(Channel::Alpha),
            "grayscale" | "gray" | "luma" => Ok(Channel::Grayscale),
            other => Err(format!("unknown channel: {other}")),
        }
    }
}

/// ITU-R BT.601 luma, rounded to the nearest byte.
fn luma(r: u8, g: u8, b: u8) -> u8 {
    let gray = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
    gray.round() as u8
}

/// Pixel storage addressed by flat pixel index and channel.
///
/// Index `i` refers to the pixel at `(i % width, i / width)`.
pub trait PixelStore {
    /// Width in pixels.
    fn width(&self) -> usize;

    /// Height in pixels.
    fn height(&self) -> usize;

    /// Reads one channel of the pixel at `index`.
    fn channel_value(&self, index: usize, channel: Channel) -> Result<u8, SpectralError>;

    /// Writes one channel of the pixel at `index`.
    fn set_channel_value(
        &mut self,
        value: u8,
        index: usize,
        channel: Channel,
    ) -> Result<(), SpectralError>;
}

/// Owned, bounds-checked RGBA8 pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl fmt::Display for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGBA[{}x{}]", self.width, self.height)
    }
}

impl PixelBuffer {
    /// Creates a zeroed (transparent black) buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * STRIDE],
        }
    }

    /// Wraps raw RGBA8 bytes in row-major order.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self, SpectralError> {
        let expected = width * height * STRIDE;
        if data.len() != expected {
            return Err(SpectralError::BufferSize {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds a grayscale image from one byte per pixel.
    pub fn from_luma(width: usize, height: usize, values: &[u8]) -> Result<Self, SpectralError> {
        if values.len() != width * height {
            return Err(SpectralError::BufferSize {
                expected: width * height,
                got: values.len(),
            });
        }
        let mut buffer = Self::new(width, height);
        for (pixel, &v) in buffer.pixels_mut().zip(values) {
            Channel::Grayscale.fill(pixel, v);
        }
        Ok(buffer)
    }

    /// Returns the image dimensions.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Raw RGBA8 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer, returning the raw RGBA8 bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8; 4]> {
        self.data
            .chunks_exact_mut(STRIDE)
            .filter_map(|pixel| <&mut [u8; 4]>::try_from(pixel).ok())
    }

    fn pixel_mut(&mut self, index: usize) -> Result<&mut [u8; 4], SpectralError> {
        let len = self.width * self.height;
        let range = self.pixel_range(index)?;
        <&mut [u8; 4]>::try_from(&mut self.data[range])
            .map_err(|_| SpectralError::IndexOutOfBounds { index, len })
    }

    fn pixel_range(&self, index: usize) -> Result<std::ops::Range<usize>, SpectralError> {
        let len = self.width * self.height;
        if index >= len {
            return Err(SpectralError::IndexOutOfBounds { index, len });
        }
        Ok(index * STRIDE..(index + 1) * STRIDE)
    }

    /// Reads the full RGBA pixel at `index`.
    pub fn rgba(&self, index: usize) -> Result<[u8; 4], SpectralError> {
        let range = self.pixel_range(index)?;
        let p = &self.data[range];
        Ok([p[0], p[1], p[2], p[3]])
    }

    /// Reads one channel at pixel coordinates.
    pub fn channel_at(&self, x: usize, y: usize, channel: Channel) -> Result<u8, SpectralError> {
        self.channel_value(self.coord_index(x, y)?, channel)
    }

    /// Writes one channel at pixel coordinates.
    pub fn set_channel_at(
        &mut self,
        value: u8,
        x: usize,
        y: usize,
        channel: Channel,
    ) -> Result<(), SpectralError> {
        let index = self.coord_index(x, y)?;
        self.set_channel_value(value, index, channel)
    }

    fn coord_index(&self, x: usize, y: usize) -> Result<usize, SpectralError> {
        if x >= self.width || y >= self.height {
            return Err(SpectralError::IndexOutOfBounds {
                index: x + y * self.width,
                len: self.width * self.height,
            });
        }
        Ok(x + y * self.width)
    }

    /// Fills one channel of every pixel with `value`.
    pub fn clear(&mut self, channel: Channel, value: u8) {
        for pixel in self.pixels_mut() {
            channel.fill(pixel, value);
        }
    }

    /// Replaces every pixel with its grayscale value (opaque).
    pub fn desaturate(&mut self) {
        for pixel in self.pixels_mut() {
            let gray = luma(pixel[0], pixel[1], pixel[2]);
            Channel::Grayscale.fill(pixel, gray);
        }
    }
}

impl PixelStore for PixelBuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn channel_value(&self, index: usize, channel: Channel) -> Result<u8, SpectralError> {
        Ok(channel.extract(self.rgba(index)?))
    }

    fn set_channel_value(
        &mut self,
        value: u8,
        index: usize,
        channel: Channel,
    ) -> Result<(), SpectralError> {
        channel.fill(self.pixel_mut(index)?, value);
        Ok(())
    }
}
