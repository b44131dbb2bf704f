use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StereoError>;

#[derive(Error, Debug)]
pub enum StereoError {
    #[error("Input image is empty.")]
    EmptyImage,
    #[error("Left and right images differ in size: left {left:?}, right {right:?} (width, height).")]
    SizeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
    #[error("Failed to open {}: {source}", .path.display())]
    ImageLoad {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Image of {width}x{height} has no interior pixels, both sides must be at least {min}.")]
    DimensionTooSmall {
        width: usize,
        height: usize,
        min: usize,
    },
    #[error("Failed to save {}: {source}", .path.display())]
    ImageSave {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Failed to parse config {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Buffer does not match the image shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

impl StereoError {
    /// Whether the error is caused by unusable input images or parameters,
    /// as opposed to a failure of the surrounding tooling.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            StereoError::EmptyImage
                | StereoError::SizeMismatch { .. }
                | StereoError::InvalidParams(_)
                | StereoError::ImageLoad { .. }
        )
    }
}
