#![no_main]

use libfuzzer_sys::fuzz_target;
use rhizome_resin_image::{PowerOfTwo, pixels_from_bytes};

fuzz_target!(|data: &[u8]| {
    // pixels_from_bytes should never panic on any input
    let _ = pixels_from_bytes(data, PowerOfTwo::Pad);
});
