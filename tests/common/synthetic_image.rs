#![allow(dead_code)]

use ndarray::Array2;

/// Deterministic high-frequency texture, one pseudo-random byte per pixel.
pub fn texture(width: usize, height: usize, seed: u32) -> Array2<u8> {
    Array2::from_shape_fn((height, width), |(y, x)| {
        let mut h = (x as u32)
            .wrapping_mul(0x9E37_79B1)
            ^ (y as u32).wrapping_mul(0x85EB_CA77)
            ^ seed.wrapping_mul(0xC2B2_AE3D);
        h ^= h >> 15;
        h = h.wrapping_mul(0x2C1B_3C6D);
        h ^= h >> 12;
        (h >> 8) as u8
    })
}

/// Stereo pair in which every left pixel `x` is seen at `x - shift` on the right.
pub fn shifted_pair(width: usize, height: usize, shift: usize) -> (Array2<u8>, Array2<u8>) {
    let scene = texture(width + shift, height, 7);
    let left = Array2::from_shape_fn((height, width), |(y, x)| scene[(y, x)]);
    let right = Array2::from_shape_fn((height, width), |(y, x)| scene[(y, x + shift)]);
    (left, right)
}

/// Stereo pair whose left half (columns below `split`) has disparity `near`
/// and whose right half has disparity `far`.
pub fn two_region_pair(
    width: usize,
    height: usize,
    split: usize,
    near: usize,
    far: usize,
) -> (Array2<u8>, Array2<u8>) {
    let scene = texture(width + near.max(far), height, 11);
    let left = Array2::from_shape_fn((height, width), |(y, x)| scene[(y, x)]);
    let right = Array2::from_shape_fn((height, width), |(y, x)| {
        if x + near < split {
            scene[(y, x + near)]
        } else {
            scene[(y, x + far)]
        }
    });
    (left, right)
}

pub fn uniform(width: usize, height: usize, value: u8) -> Array2<u8> {
    Array2::from_elem((height, width), value)
}
