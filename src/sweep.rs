use log::debug;
use ndarray::parallel::prelude::*;
use ndarray::{s, ArrayView2, ArrayViewMut3, Axis};

use crate::cost::CostModel;
use crate::grid::{MrfGrid, Slot};
use crate::params::BpParams;

/// Direction in which a sweep sends messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left = 0,
    Right = 1,
    Up = 2,
    Down = 3,
}

impl Direction {
    /// Order of the sweeps inside one iteration.
    pub const SCHEDULE: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    fn scan_line(self) -> &'static ScanLine {
        &SCANLINES[self as usize]
    }
}

/// How a sweep is executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SweepOptions {
    pub parallel: bool,
    pub normalize: bool,
}

impl SweepOptions {
    pub fn new(params: &BpParams) -> Self {
        Self {
            parallel: params.parallel,
            normalize: params.normalize,
        }
    }
}

struct ScanLine {
    drow: isize,
    dcol: isize,
    // incoming box left out of the outgoing message
    skip: Slot,
    // box of the receiving neighbor that gets overwritten
    write: Slot,
}

static SCANLINES: [ScanLine; 4] = [
    ScanLine {
        drow: 0,
        dcol: -1,
        skip: Slot::Left,
        write: Slot::Right,
    },
    ScanLine {
        drow: 0,
        dcol: 1,
        skip: Slot::Right,
        write: Slot::Left,
    },
    ScanLine {
        drow: -1,
        dcol: 0,
        skip: Slot::Up,
        write: Slot::Down,
    },
    ScanLine {
        drow: 1,
        dcol: 0,
        skip: Slot::Down,
        write: Slot::Up,
    },
];

/// Min-sum message from a pixel to its neighbor on the `skip` side.
///
/// `belief` is scratch space; the result lands in `out`.
fn outgoing_message(
    pixel: ArrayView2<u32>,
    skip: Slot,
    cost: &CostModel,
    normalize: bool,
    belief: &mut [u32],
    out: &mut [u32],
) {
    for (j, b) in belief.iter_mut().enumerate() {
        *b = Slot::ALL
            .iter()
            .filter(|&&slot| slot != skip)
            .fold(0u32, |acc, &slot| acc.saturating_add(pixel[(slot.index(), j)]));
    }
    for (i, o) in out.iter_mut().enumerate() {
        *o = belief
            .iter()
            .enumerate()
            .map(|(j, &b)| b.saturating_add(cost.smoothness(i, j)))
            .fold(u32::MAX, u32::min);
    }
    if normalize {
        let floor = out.iter().copied().min().unwrap_or(0);
        out.iter_mut().for_each(|o| *o -= floor);
    }
}

/// Pass messages along one row or column, `(position, slot, label)`,
/// visiting positions in the direction the messages travel.
fn pass_line(
    mut line: ArrayViewMut3<u32>,
    forward: bool,
    scan: &ScanLine,
    cost: &CostModel,
    normalize: bool,
) {
    let len = line.len_of(Axis(0));
    let labels = line.len_of(Axis(2));
    let mut belief = vec![0u32; labels];
    let mut out = vec![0u32; labels];
    for k in 0..len.saturating_sub(1) {
        let (src, dst) = if forward {
            (k, k + 1)
        } else {
            (len - 1 - k, len - 2 - k)
        };
        outgoing_message(
            line.index_axis(Axis(0), src),
            scan.skip,
            cost,
            normalize,
            &mut belief,
            &mut out,
        );
        line.slice_mut(s![dst, scan.write.index(), ..])
            .iter_mut()
            .zip(&out)
            .for_each(|(m, &v)| *m = v);
    }
}

/// One directional sweep over the whole grid.
///
/// Rows (for `Left`/`Right`) or columns (for `Up`/`Down`) are independent of
/// each other, so with `options.parallel` they are spread over the rayon pool.
pub fn sweep(grid: &mut MrfGrid, direction: Direction, cost: &CostModel, options: SweepOptions) {
    let scan = direction.scan_line();
    let (axis, forward) = if scan.drow == 0 {
        (Axis(0), scan.dcol > 0)
    } else {
        (Axis(1), scan.drow > 0)
    };
    let start = std::time::Instant::now();
    let normalize = options.normalize;
    let lines = grid.messages.axis_iter_mut(axis);
    if options.parallel {
        lines
            .into_par_iter()
            .for_each(|line| pass_line(line, forward, scan, cost, normalize));
    } else {
        lines.for_each(|line| pass_line(line, forward, scan, cost, normalize));
    }
    debug!(
        "sweep {:?}: {:.3} ms",
        direction,
        start.elapsed().as_secs_f64() * 1e3
    );
}
