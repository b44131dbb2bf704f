//! Inference parameters and their JSON loader.
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, StereoError};

/// Largest label count that still fits the 8-bit disparity output.
pub const MAX_LABELS: usize = 256;

/// Parameters of the stereo MRF and of the inference schedule.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BpParams {
    /// Number of disparity labels.
    pub labels: usize,
    /// Outer belief propagation iterations.
    pub iterations: usize,
    /// Smoothness weight.
    pub lambda: u32,
    /// Label difference at which the smoothness cost stops growing.
    pub truncation: u32,
    /// Radius of the block matching window.
    pub radius: usize,
    /// Width of the frame around the image that carries no data cost.
    pub border: usize,
    /// Sweep independent rows/columns on the rayon pool.
    pub parallel: bool,
    /// Shift every outgoing message so its smallest entry is zero. Labels and
    /// energies are unaffected; raw messages otherwise keep growing.
    pub normalize: bool,
}

impl Default for BpParams {
    fn default() -> Self {
        Self {
            labels: 16,
            iterations: 40,
            lambda: 20,
            truncation: 2,
            radius: 2,
            border: 16,
            parallel: true,
            normalize: true,
        }
    }
}

impl BpParams {
    /// Default parameters with `labels` disparities and the narrowest valid border.
    pub fn with_labels(labels: usize) -> Self {
        let defaults = Self::default();
        Self {
            labels,
            border: labels.max(defaults.radius),
            ..defaults
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Smallest image side that still leaves one interior pixel.
    pub fn min_side(&self) -> usize {
        2 * self.border + 1
    }

    pub fn validate(&self) -> Result<()> {
        if self.labels == 0 || self.labels > MAX_LABELS {
            return Err(StereoError::InvalidParams(format!(
                "labels must be in 1..={MAX_LABELS}, got {}",
                self.labels
            )));
        }
        let required = self.labels.max(self.radius);
        if self.border < required {
            return Err(StereoError::InvalidParams(format!(
                "border {} is narrower than max(labels, radius) = {required}",
                self.border
            )));
        }
        let reach = self.truncation.min((self.labels - 1) as u32);
        if self.lambda.checked_mul(reach).is_none() {
            return Err(StereoError::InvalidParams(format!(
                "smoothness cost lambda * {reach} overflows u32 for lambda = {}",
                self.lambda
            )));
        }
        Ok(())
    }
}

/// Read parameters from a JSON file. Missing fields keep their defaults.
pub fn load_params(path: &Path) -> Result<BpParams> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|source| StereoError::Config {
        path: path.to_path_buf(),
        source,
    })
}
