//! Image helpers around the inference core.
//!
//! - `load_grayscale`: decode a PNG/JPEG/etc. into an 8-bit `(height, width)` array.
//! - `render_disparity`: stretch labels over the 8-bit range for viewing.
//! - `save_gray`: write a grayscale image, format chosen by extension.
use std::fs;
use std::path::Path;

use image::{GrayImage, Luma};
use ndarray::{Array2, ArrayView2};

use crate::error::{Result, StereoError};

/// Load an image from disk and convert it to 8-bit grayscale.
pub fn load_grayscale(path: &Path) -> Result<Array2<u8>> {
    let img = image::open(path)
        .map_err(|source| StereoError::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .into_luma8();
    gray_to_array(&img)
}

pub fn gray_to_array(img: &GrayImage) -> Result<Array2<u8>> {
    let shape = (img.height() as usize, img.width() as usize);
    Ok(Array2::from_shape_vec(shape, img.as_raw().clone())?)
}

pub fn array_to_gray(values: ArrayView2<u8>) -> GrayImage {
    let (height, width) = values.dim();
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        Luma([values[(y as usize, x as usize)]])
    })
}

/// Scale each label by `256 / labels` so neighboring disparities are visible.
pub fn render_disparity(disparity: ArrayView2<u8>, labels: usize) -> GrayImage {
    let scale = 256 / labels.max(1) as u32;
    array_to_gray(disparity.mapv(|l| (l as u32 * scale).min(255) as u8).view())
}

/// Save a grayscale image, creating parent directories as needed.
pub fn save_gray(img: &GrayImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    img.save(path).map_err(|source| StereoError::ImageSave {
        path: path.to_path_buf(),
        source,
    })
}
