//! Image file glue for spectrum rendering.
//!
//! Decodes images into power-of-two [`PixelBuffer`]s and encodes rendered
//! spectra back to PNG.
//!
//! # Example
//!
//! ```ignore
//! use rhizome_resin_image::{load_pixels, export_png};
//! use rhizome_resin_spectral::SpectrumView;
//!
//! let pixels = load_pixels("photo.jpg")?;
//! let spectrum = SpectrumView::default().apply(&pixels)?;
//! export_png(&spectrum, "photo_spectrum.png")?;
//! ```

use std::io::{BufRead, Seek};
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageError, RgbaImage};
use tracing::debug;

use rhizome_resin_spectral::{PixelBuffer, SpectralError};

/// How to bring image sides up to the next power of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerOfTwo {
    /// Stretch the image to fill the larger canvas.
    #[default]
    Resize,
    /// Keep the image at the top-left and fill the rest with transparent black.
    Pad,
}

/// Errors that can occur when loading or saving images.
#[derive(Debug)]
pub enum ImageLoadError {
    /// Failed to decode or encode the image.
    ImageError(ImageError),
    /// I/O error reading the file.
    IoError(std::io::Error),
    /// Decoded pixels could not be wrapped in a pixel buffer.
    Spectral(SpectralError),
}

impl std::fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageLoadError::ImageError(e) => write!(f, "Image error: {}", e),
            ImageLoadError::IoError(e) => write!(f, "IO error: {}", e),
            ImageLoadError::Spectral(e) => write!(f, "Pixel error: {}", e),
        }
    }
}

impl std::error::Error for ImageLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageLoadError::ImageError(e) => Some(e),
            ImageLoadError::IoError(e) => Some(e),
            ImageLoadError::Spectral(e) => Some(e),
        }
    }
}

impl From<ImageError> for ImageLoadError {
    fn from(e: ImageError) -> Self {
        ImageLoadError::ImageError(e)
    }
}

impl From<std::io::Error> for ImageLoadError {
    fn from(e: std::io::Error) -> Self {
        ImageLoadError::IoError(e)
    }
}

impl From<SpectralError> for ImageLoadError {
    fn from(e: SpectralError) -> Self {
        ImageLoadError::Spectral(e)
    }
}

/// Loads an image file, resizing it to power-of-two dimensions.
pub fn load_pixels<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, ImageLoadError> {
    load_pixels_with(path, PowerOfTwo::Resize)
}

/// Loads an image file, normalizing its sides with `mode`.
pub fn load_pixels_with<P: AsRef<Path>>(
    path: P,
    mode: PowerOfTwo,
) -> Result<PixelBuffer, ImageLoadError> {
    let img = image::open(path)?;
    pixels_from_image(img, mode)
}

/// Decodes an image from raw bytes.
pub fn pixels_from_bytes(bytes: &[u8], mode: PowerOfTwo) -> Result<PixelBuffer, ImageLoadError> {
    let img = image::load_from_memory(bytes)?;
    pixels_from_image(img, mode)
}

/// Decodes an image from a reader, guessing the format.
pub fn pixels_from_reader<R: BufRead + Seek>(
    reader: R,
    mode: PowerOfTwo,
) -> Result<PixelBuffer, ImageLoadError> {
    let img = image::ImageReader::new(reader)
        .with_guessed_format()?
        .decode()?;
    pixels_from_image(img, mode)
}

/// Converts a decoded image to RGBA8 with power-of-two sides.
pub fn pixels_from_image(
    img: DynamicImage,
    mode: PowerOfTwo,
) -> Result<PixelBuffer, ImageLoadError> {
    let (width, height) = img.dimensions();
    let (nw, nh) = power_of_two_dimensions(width, height);

    let rgba = if (nw, nh) == (width, height) {
        img.to_rgba8()
    } else {
        debug!(width, height, nw, nh, ?mode, "normalizing to power of two");
        match mode {
            PowerOfTwo::Resize => imageops::resize(&img, nw, nh, FilterType::Triangle),
            PowerOfTwo::Pad => {
                let mut canvas = RgbaImage::new(nw, nh);
                imageops::replace(&mut canvas, &img.to_rgba8(), 0, 0);
                canvas
            }
        }
    };

    let buffer = PixelBuffer::from_rgba(nw as usize, nh as usize, rgba.into_raw())?;
    Ok(buffer)
}

/// Rounds each side up to the next power of two.
pub fn power_of_two_dimensions(width: u32, height: u32) -> (u32, u32) {
    (width.max(1).next_power_of_two(), height.max(1).next_power_of_two())
}

/// Copies a pixel buffer into an `image` RGBA buffer.
pub fn to_rgba_image(pixels: &PixelBuffer) -> Result<RgbaImage, ImageLoadError> {
    let (width, height) = pixels.dimensions();
    RgbaImage::from_raw(width as u32, height as u32, pixels.as_bytes().to_vec()).ok_or(
        ImageLoadError::Spectral(SpectralError::BufferSize {
            expected: width * height * 4,
            got: pixels.as_bytes().len(),
        }),
    )
}

/// Exports a pixel buffer to a PNG file.
pub fn export_png<P: AsRef<Path>>(pixels: &PixelBuffer, path: P) -> Result<(), ImageLoadError> {
    let img_buf = to_rgba_image(pixels)?;
    img_buf.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rhizome_resin_spectral::{Channel, PixelStore, SpectrumView};
    use std::io::Cursor;

    fn encode_png(img: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_power_of_two_dimensions() {
        assert_eq!(power_of_two_dimensions(4, 8), (4, 8));
        assert_eq!(power_of_two_dimensions(5, 3), (8, 4));
        assert_eq!(power_of_two_dimensions(0, 1), (1, 1));
    }

    #[test]
    fn test_decode_keeps_power_of_two() {
        let img = RgbaImage::from_fn(4, 2, |x, y| image::Rgba([x as u8, y as u8, 7, 255]));
        let pixels = pixels_from_bytes(&encode_png(&img), PowerOfTwo::Resize).unwrap();
        assert_eq!(pixels.dimensions(), (4, 2));
        assert_eq!(pixels.channel_value(5, Channel::Red), Ok(1));
        assert_eq!(pixels.channel_value(5, Channel::Green), Ok(1));
        assert_eq!(pixels.channel_value(5, Channel::Blue), Ok(7));
    }

    #[test]
    fn test_decode_resizes() {
        let img = RgbaImage::from_pixel(3, 5, image::Rgba([40, 40, 40, 255]));
        let pixels = pixels_from_bytes(&encode_png(&img), PowerOfTwo::Resize).unwrap();
        assert_eq!(pixels.dimensions(), (4, 8));
        // A flat image stays flat under interpolation.
        for i in 0..32 {
            let gray = pixels.channel_value(i, Channel::Grayscale).unwrap();
            assert!(gray.abs_diff(40) <= 1, "pixel {} drifted to {}", i, gray);
        }
    }

    #[test]
    fn test_decode_pads() {
        let img = RgbaImage::from_pixel(3, 1, image::Rgba([9, 9, 9, 255]));
        let pixels =
            pixels_from_reader(Cursor::new(encode_png(&img)), PowerOfTwo::Pad).unwrap();
        assert_eq!(pixels.dimensions(), (4, 1));
        assert_eq!(pixels.rgba(2), Ok([9, 9, 9, 255]));
        assert_eq!(pixels.rgba(3), Ok([0, 0, 0, 0]));
    }

    #[test]
    fn test_load_file_padded() {
        let path = std::env::temp_dir().join("resin_image_pad_test.png");
        RgbaImage::from_pixel(3, 2, image::Rgba([50, 60, 70, 255]))
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();

        let padded = load_pixels_with(&path, PowerOfTwo::Pad).unwrap();
        let resized = load_pixels(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(padded.dimensions(), (4, 2));
        assert_eq!(padded.rgba(2), Ok([50, 60, 70, 255]));
        assert_eq!(padded.rgba(3), Ok([0, 0, 0, 0]));
        assert_eq!(resized.dimensions(), (4, 2));
    }

    #[test]
    fn test_invalid_bytes() {
        let result = pixels_from_bytes(b"definitely not an image", PowerOfTwo::Resize);
        assert!(matches!(result, Err(ImageLoadError::ImageError(_))));
    }

    #[test]
    fn test_export_png_roundtrip() {
        let source = PixelBuffer::from_luma(2, 2, &[10, 20, 30, 40]).unwrap();
        let spectrum = SpectrumView::default().apply(&source).unwrap();

        let path = std::env::temp_dir().join("resin_image_spectrum_test.png");
        export_png(&spectrum, &path).unwrap();
        let loaded = load_pixels(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, spectrum);
    }

    #[test]
    fn test_missing_file() {
        let result = load_pixels("/nonexistent/resin/spectrum.png");
        assert!(result.is_err());
    }
}
