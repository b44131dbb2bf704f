use ndarray::ArrayView2;

use crate::params::BpParams;

/// Unary and pairwise potentials of the stereo MRF.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CostModel {
    pub lambda: u32,
    pub truncation: u32,
    pub radius: usize,
}

impl CostModel {
    pub fn new(params: &BpParams) -> Self {
        Self {
            lambda: params.lambda,
            truncation: params.truncation,
            radius: params.radius,
        }
    }

    /// Truncated linear prior: `lambda * min(|i - j|, truncation)`.
    ///
    /// Saturates at `u32::MAX`; `BpParams::validate` rejects weights that
    /// would reach it.
    #[inline]
    pub fn smoothness(&self, i: usize, j: usize) -> u32 {
        let d = i.abs_diff(j).min(self.truncation as usize) as u32;
        self.lambda.saturating_mul(d)
    }

    /// Mean absolute difference between the window around `(x, y)` in `left`
    /// and the window around `(x - label, y)` in `right`.
    ///
    /// Callers keep the window inside both images vertically and on the
    /// right; right-image columns left of zero are clamped to the first column.
    pub fn data(
        &self,
        left: &ArrayView2<u8>,
        right: &ArrayView2<u8>,
        x: usize,
        y: usize,
        label: usize,
    ) -> u32 {
        let r = self.radius as isize;
        let mut sum: u32 = 0;
        for dy in -r..=r {
            let row = (y as isize + dy) as usize;
            for dx in -r..=r {
                let xl = (x as isize + dx) as usize;
                let xr = (x as isize + dx - label as isize).max(0) as usize;
                sum += left[(row, xl)].abs_diff(right[(row, xr)]) as u32;
            }
        }
        let side = 2 * self.radius as u32 + 1;
        sum / (side * side)
    }
}
