use log::debug;
use ndarray::parallel::prelude::*;
use ndarray::{s, ArrayView2, ArrayViewMut2, Axis};
use rayon::prelude::IndexedParallelIterator;

use crate::cost::CostModel;
use crate::error::{Result, StereoError};
use crate::grid::{MrfGrid, Slot};
use crate::params::BpParams;

/// Validate an image pair against `params` and build a grid whose data
/// boxes hold the block matching cost of every interior pixel.
///
/// Border pixels, and every non-data message, start at zero.
pub fn initialize(
    left: ArrayView2<u8>,
    right: ArrayView2<u8>,
    params: &BpParams,
) -> Result<MrfGrid> {
    params.validate()?;
    if left.is_empty() || right.is_empty() {
        return Err(StereoError::EmptyImage);
    }
    let (height, width) = left.dim();
    if left.dim() != right.dim() {
        let (rh, rw) = right.dim();
        return Err(StereoError::SizeMismatch {
            left: (width, height),
            right: (rw, rh),
        });
    }
    let min = params.min_side();
    if width < min || height < min {
        return Err(StereoError::DimensionTooSmall { width, height, min });
    }

    let mut grid = MrfGrid::new(width, height, params.labels);
    let border = params.border;
    let cost = CostModel::new(params);
    debug!(
        "initialize: {}x{} grid, {} labels, interior [{}, {}) x [{}, {})",
        width,
        height,
        params.labels,
        border,
        width - border,
        border,
        height - border
    );

    let mut data = grid.messages.slice_mut(s![
        border..height - border,
        border..width - border,
        Slot::Data.index(),
        ..
    ]);
    let fill_row = |(row, mut costs): (usize, ArrayViewMut2<u32>)| {
        let y = border + row;
        for (col, mut pixel) in costs.outer_iter_mut().enumerate() {
            let x = border + col;
            for (label, c) in pixel.iter_mut().enumerate() {
                *c = cost.data(&left, &right, x, y, label);
            }
        }
    };
    if params.parallel {
        data.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(fill_row);
    } else {
        data.axis_iter_mut(Axis(0))
            .enumerate()
            .for_each(fill_row);
    }
    Ok(grid)
}
