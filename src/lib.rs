//! # Loopy belief propagation stereo
//!
//! Dense disparity from a rectified grayscale stereo pair. Every pixel is a
//! node of a 4-connected MRF with a block matching data term and a truncated
//! linear smoothness prior; min-sum belief propagation with directional
//! sweeps approximates the MAP labeling.
//!
//! ```no_run
//! use lbp_stereo::{compute_disp, BpParams};
//!
//! let left = image::open("left.png").unwrap().to_luma8();
//! let right = image::open("right.png").unwrap().to_luma8();
//! let disparity = compute_disp(&left, &right, &BpParams::default()).unwrap();
//! disparity.save("disparity.png").unwrap();
//! ```

pub mod cost;
pub mod decode;
pub mod driver;
pub mod error;
pub mod grid;
pub mod init;
pub mod io;
pub mod params;
pub mod sweep;

pub use crate::cost::CostModel;
pub use crate::driver::LoopyBp;
pub use crate::error::{Result, StereoError};
pub use crate::grid::{MrfGrid, Slot};
pub use crate::params::{load_params, BpParams};
pub use crate::sweep::{Direction, SweepOptions};

use image::GrayImage;

/// Disparity labels for a stereo pair, border pixels set to 0.
pub fn compute_disp(left: &GrayImage, right: &GrayImage, params: &BpParams) -> Result<GrayImage> {
    let left = io::gray_to_array(left)?;
    let right = io::gray_to_array(right)?;
    let mut bp = LoopyBp::new(left.view(), right.view(), params.clone())?;
    bp.run();
    let disparity = bp
        .disparity()
        .unwrap_or_else(|| ndarray::Array2::zeros(left.dim()));
    Ok(io::array_to_gray(disparity.view()))
}
