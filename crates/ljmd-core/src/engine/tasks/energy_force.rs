use crate::core::forcefield::params::{LennardJonesParams, SystemParams};
use crate::core::forcefield::potentials::{lennard_jones_pair, minimum_image};
use crate::core::models::ensemble::{Ensemble, ForceAccumulator, PositionView};
use crate::engine::config::{Schedule, Strategy};
use crate::engine::progress::{Progress, ProgressReporter};
use tracing::{instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::{Mutex, PoisonError};

/// Phase name reported around every evaluation.
pub const ENERGY_FORCE_PHASE: &str = "energy_force";

/// Evaluates forces, potential energy and virial with the default strategy.
///
/// Positions are read; forces, energy and virial are reset and overwritten. The long-range
/// correction is not included.
pub fn compute_energy_and_force(
    ensemble: &mut Ensemble,
    params: &LennardJonesParams,
    system: &SystemParams,
) {
    compute_energy_and_force_with(
        ensemble,
        params,
        system,
        Strategy::default(),
        Schedule::default(),
        &ProgressReporter::new(),
    );
}

/// Evaluates forces, potential energy and virial with an explicit strategy.
///
/// `reporter` receives `PhaseStart { name: ENERGY_FORCE_PHASE }` before any state is touched
/// and `PhaseFinish` once the prefactors have been applied. The parallel strategy runs on the
/// rayon pool the call is made from.
#[instrument(skip_all, name = "energy_force_task", fields(atoms = ensemble.len(), strategy = %strategy))]
pub fn compute_energy_and_force_with(
    ensemble: &mut Ensemble,
    params: &LennardJonesParams,
    system: &SystemParams,
    strategy: Strategy,
    schedule: Schedule,
    reporter: &ProgressReporter,
) {
    reporter.report(Progress::PhaseStart {
        name: ENERGY_FORCE_PHASE,
    });

    ensemble.reset_accumulators();

    match strategy {
        Strategy::Scalar => accumulate_scalar(ensemble, params, system),
        Strategy::Vectorized => accumulate_vectorized(ensemble, params, system),
        #[cfg(feature = "parallel")]
        Strategy::Parallel => accumulate_parallel(ensemble, params, system, schedule),
        #[cfg(not(feature = "parallel"))]
        Strategy::Parallel => {
            let _ = schedule;
            accumulate_vectorized(ensemble, params, system)
        }
    }

    let epsilon = params.epsilon();
    ensemble.apply_prefactors(4.0 * epsilon, 24.0 * epsilon);

    trace!(
        energy = ensemble.potential_energy(),
        virial = ensemble.virial(),
        "Evaluation complete."
    );
    reporter.report(Progress::PhaseFinish);
}

#[inline(always)]
fn separation(
    positions: &PositionView,
    i: usize,
    j: usize,
    system: &SystemParams,
) -> (f32, f32, f32) {
    let side = system.side();
    let half = system.half_side();
    (
        minimum_image(positions.xx[i] - positions.xx[j], side, half),
        minimum_image(positions.yy[i] - positions.yy[j], side, half),
        minimum_image(positions.zz[i] - positions.zz[j], side, half),
    )
}

// Every (i, j) cell is written by exactly one pair, so this is race-free only single-threaded.
fn accumulate_scalar(ensemble: &mut Ensemble, params: &LennardJonesParams, system: &SystemParams) {
    let (positions, mut acc) = ensemble.split_mut();
    let n = positions.xx.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let (dx, dy, dz) = separation(&positions, i, j, system);
            let dis2 = dx * dx + dy * dy + dz * dz;
            if let Some(term) = lennard_jones_pair(dis2, params) {
                *acc.totals += term;

                let fx = term.force_scale * dx;
                let fy = term.force_scale * dy;
                let fz = term.force_scale * dz;
                acc.fx[i] += fx;
                acc.fy[i] += fy;
                acc.fz[i] += fz;
                acc.fx[j] -= fx;
                acc.fy[j] -= fy;
                acc.fz[j] -= fz;
            }
        }
    }
}

fn accumulate_vectorized(
    ensemble: &mut Ensemble,
    params: &LennardJonesParams,
    system: &SystemParams,
) {
    let n = ensemble.len();
    let (positions, mut acc) = ensemble.split_mut();
    let mut scratch = RowScratch::new(n);

    for i in 0..n {
        scratch.fill(i, &positions, params, system);
        scratch.apply(i, &mut acc);
    }
}

#[cfg(feature = "parallel")]
fn accumulate_parallel(
    ensemble: &mut Ensemble,
    params: &LennardJonesParams,
    system: &SystemParams,
    schedule: Schedule,
) {
    let n = ensemble.len();
    let (positions, acc) = ensemble.split_mut();
    let shared = Mutex::new(acc);

    let process_row = |scratch: &mut RowScratch, i: usize| {
        scratch.fill(i, &positions, params, system);
        let mut guard = shared.lock().unwrap_or_else(PoisonError::into_inner);
        scratch.apply(i, &mut guard);
    };

    let rows = (0..n).into_par_iter();
    match schedule {
        Schedule::Adaptive => rows.for_each_init(|| RowScratch::new(n), process_row),
        Schedule::Dynamic { chunk } => rows
            .with_max_len(chunk.max(1))
            .for_each_init(|| RowScratch::new(n), process_row),
    }
}

/// Per-row buffers indexed by `j`, holding the contributions of pairs `(i, j)` for `j > i`.
///
/// Only slots `i + 1..n` are meaningful for row `i`; [`RowScratch::fill`] overwrites all of them,
/// writing zeros for pairs beyond the cutoff.
#[derive(Debug, Clone)]
struct RowScratch {
    fx: Vec<f32>,
    fy: Vec<f32>,
    fz: Vec<f32>,
    energy: Vec<f32>,
    virial: Vec<f32>,
}

impl RowScratch {
    fn new(n: usize) -> Self {
        Self {
            fx: vec![0.0; n],
            fy: vec![0.0; n],
            fz: vec![0.0; n],
            energy: vec![0.0; n],
            virial: vec![0.0; n],
        }
    }

    /// Touches only the scratch buffers and the read-only positions.
    fn fill(
        &mut self,
        i: usize,
        positions: &PositionView,
        params: &LennardJonesParams,
        system: &SystemParams,
    ) {
        let n = positions.xx.len();
        for j in (i + 1)..n {
            let (dx, dy, dz) = separation(positions, i, j, system);
            let dis2 = dx * dx + dy * dy + dz * dz;
            let term = lennard_jones_pair(dis2, params).unwrap_or_default();

            self.energy[j] = term.energy;
            self.virial[j] = term.virial;
            self.fx[j] = term.force_scale * dx;
            self.fy[j] = term.force_scale * dy;
            self.fz[j] = term.force_scale * dz;
        }
    }

    fn apply(&self, i: usize, acc: &mut ForceAccumulator) {
        let n = acc.fx.len();
        for j in (i + 1)..n {
            acc.fx[i] += self.fx[j];
            acc.fy[i] += self.fy[j];
            acc.fz[i] += self.fz[j];
            acc.fx[j] -= self.fx[j];
            acc.fy[j] -= self.fy[j];
            acc.fz[j] -= self.fz[j];
            acc.totals.energy += self.energy[j];
            acc.totals.virial -= self.virial[j];
        }
    }
}
