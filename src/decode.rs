use ndarray::s;

use crate::cost::CostModel;
use crate::grid::{MrfGrid, Slot};

/// Pick the label with the smallest belief at every pixel, then return the
/// energy of that labeling.
pub fn decode(grid: &mut MrfGrid, cost: &CostModel) -> u64 {
    assign_labels(grid);
    energy(grid, cost)
}

/// MAP label per pixel from the four incoming messages plus the data cost.
/// Ties go to the smaller label; beliefs saturate at `u32::MAX`.
fn assign_labels(grid: &mut MrfGrid) {
    let labels = grid.labels();
    for ((y, x), best) in grid.best.indexed_iter_mut() {
        let pixel = grid.messages.slice(s![y, x, .., ..]);
        let belief = |l: usize| {
            pixel
                .column(l)
                .iter()
                .fold(0u32, |acc, &m| acc.saturating_add(m))
        };
        let mut argmin = 0;
        let mut min = belief(0);
        for l in 1..labels {
            let b = belief(l);
            if b < min {
                min = b;
                argmin = l;
            }
        }
        *best = argmin as u8;
    }
    grid.decoded = true;
}

/// Energy of the decoded labeling.
///
/// Smoothness is added once per existing 4-neighbor of every pixel, so each
/// undirected edge contributes twice.
pub fn energy(grid: &MrfGrid, cost: &CostModel) -> u64 {
    let (height, width) = grid.best.dim();
    let best = &grid.best;
    let mut total: u64 = 0;
    for y in 0..height {
        for x in 0..width {
            let label = best[(y, x)] as usize;
            total += grid.messages[(y, x, Slot::Data.index(), label)] as u64;

            let mut smooth = |ny: usize, nx: usize| {
                total += cost.smoothness(label, best[(ny, nx)] as usize) as u64;
            };
            if x > 0 {
                smooth(y, x - 1);
            }
            if x + 1 < width {
                smooth(y, x + 1);
            }
            if y > 0 {
                smooth(y - 1, x);
            }
            if y + 1 < height {
                smooth(y + 1, x);
            }
        }
    }
    total
}
