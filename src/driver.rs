use log::{debug, info};
use ndarray::{s, Array2, ArrayView2};

use crate::cost::CostModel;
use crate::decode::decode;
use crate::error::Result;
use crate::grid::MrfGrid;
use crate::init::initialize;
use crate::params::BpParams;
use crate::sweep::{sweep, Direction, SweepOptions};

/// Loopy belief propagation over a stereo pair.
///
/// Owns the grid for the whole run; each iteration sweeps right, left, up and
/// down, then decodes and reports the energy.
#[derive(Clone, Debug)]
pub struct LoopyBp {
    params: BpParams,
    cost: CostModel,
    options: SweepOptions,
    grid: MrfGrid,
    iteration: usize,
}

impl LoopyBp {
    pub fn new(left: ArrayView2<u8>, right: ArrayView2<u8>, params: BpParams) -> Result<Self> {
        let grid = initialize(left, right, &params)?;
        Ok(Self {
            cost: CostModel::new(&params),
            options: SweepOptions::new(&params),
            params,
            grid,
            iteration: 0,
        })
    }

    pub fn params(&self) -> &BpParams {
        &self.params
    }

    pub fn grid(&self) -> &MrfGrid {
        &self.grid
    }

    /// Iterations completed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Run one sweep without decoding.
    pub fn sweep(&mut self, direction: Direction) {
        sweep(&mut self.grid, direction, &self.cost, self.options);
    }

    /// Decode the current messages and return the energy of the labeling.
    pub fn decode(&mut self) -> u64 {
        decode(&mut self.grid, &self.cost)
    }

    /// One full iteration; returns the energy after decoding.
    pub fn iterate(&mut self) -> u64 {
        for direction in Direction::SCHEDULE {
            self.sweep(direction);
        }
        let energy = self.decode();
        self.iteration += 1;
        energy
    }

    /// Run the configured number of iterations and return their energies.
    ///
    /// With zero iterations the data term alone is decoded once, so a
    /// disparity map is always available afterwards.
    pub fn run(&mut self) -> Vec<u64> {
        let total = self.params.iterations;
        if total == 0 {
            let energy = self.decode();
            debug!("no iterations requested, data-only energy = {energy}");
            return Vec::new();
        }
        let mut energies = Vec::with_capacity(total);
        for k in 1..=total {
            let energy = self.iterate();
            info!("iteration {k}/{total}, energy = {energy}");
            energies.push(energy);
        }
        energies
    }

    /// Decoded labels with the border forced to zero, `None` before the
    /// first decode.
    pub fn disparity(&self) -> Option<Array2<u8>> {
        let labels = self.grid.best_labels()?;
        let (height, width) = labels.dim();
        let b = self.params.border;
        let mut out = Array2::zeros((height, width));
        out.slice_mut(s![b..height - b, b..width - b])
            .assign(&labels.slice(s![b..height - b, b..width - b]));
        Some(out)
    }
}
