#![no_main]

use libfuzzer_sys::fuzz_target;
use rhizome_resin_spectral::{Channel, PixelBuffer, SpectrumLayout, SpectrumView};

fuzz_target!(|data: &[u8]| {
    // First byte picks the grid shape, second the channel and layout.
    let [shape, mode, pixels @ ..] = data else {
        return;
    };
    let width = 1usize << (shape & 0x07).min(5);
    let height = 1usize << (shape >> 4).min(5);

    let mut rgba = pixels.to_vec();
    rgba.resize(width * height * 4, 0);
    let Ok(image) = PixelBuffer::from_rgba(width, height, rgba) else {
        return;
    };

    let channel = match mode & 0x07 {
        0 => Channel::Red,
        1 => Channel::Green,
        2 => Channel::Blue,
        3 => Channel::Alpha,
        _ => Channel::Grayscale,
    };
    let layout = if mode & 0x80 == 0 {
        SpectrumLayout::Flattened
    } else {
        SpectrumLayout::Separable
    };

    // Power-of-two grids must always render to an opaque image of the same size
    let out = SpectrumView::new(channel)
        .with_layout(layout)
        .apply(&image)
        .unwrap();
    assert_eq!(out.dimensions(), (width, height));
    assert!(out.as_bytes().chunks(4).all(|p| p[3] == 255));
});
