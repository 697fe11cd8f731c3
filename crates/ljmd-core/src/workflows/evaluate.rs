use crate::core::forcefield::long_range::{LongRangeCorrection, compute_long_range_correction};
use crate::core::models::ensemble::Ensemble;
use crate::engine::config::{EvaluationConfig, Strategy};
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks::energy_force::compute_energy_and_force_with;
use nalgebra::Vector3;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub atom_count: usize,
    pub strategy: Strategy,
    pub evaluations: usize,
    /// Truncated pair energy, without the long-range correction.
    pub potential_energy: f32,
    pub virial: f32,
    pub long_range: LongRangeCorrection,
    pub net_force: Vector3<f64>,
}

impl EvaluationReport {
    /// Pair energy plus the analytic tail beyond the cutoff.
    pub fn corrected_energy(&self) -> f32 {
        self.potential_energy + self.long_range.energy
    }

    pub fn corrected_energy_per_atom(&self) -> f32 {
        self.corrected_energy() / self.atom_count as f32
    }
}

#[instrument(skip_all, name = "evaluate_workflow")]
pub fn run(
    ensemble: &mut Ensemble,
    config: &EvaluationConfig,
    reporter: &ProgressReporter,
) -> Result<EvaluationReport, EngineError> {
    validate(ensemble, config)?;

    if config.potential.cutoff() > config.system.half_side() {
        let message = format!(
            "Cutoff {} exceeds half the box side {}; atoms will interact with a single image only.",
            config.potential.cutoff(),
            config.system.half_side()
        );
        warn!("{}", message);
        reporter.report(Progress::Message(message));
    }

    let long_range = compute_long_range_correction(&config.potential, &config.system);
    debug!(
        energy = long_range.energy,
        force = long_range.force,
        "Computed long-range correction."
    );

    info!(
        atoms = ensemble.len(),
        strategy = %config.strategy,
        evaluations = config.evaluations,
        "Starting force/energy evaluation."
    );
    reporter.report(Progress::TaskStart {
        total_steps: config.evaluations as u64,
    });

    with_thread_pool(config.threads, || {
        for _ in 0..config.evaluations {
            compute_energy_and_force_with(
                ensemble,
                &config.potential,
                &config.system,
                config.strategy,
                config.schedule,
                reporter,
            );
            reporter.report(Progress::TaskIncrement);
        }
    })?;

    reporter.report(Progress::TaskFinish);

    let report = EvaluationReport {
        atom_count: ensemble.len(),
        strategy: config.strategy,
        evaluations: config.evaluations,
        potential_energy: ensemble.potential_energy(),
        virial: ensemble.virial(),
        long_range,
        net_force: ensemble.net_force(),
    };

    info!(
        energy = report.potential_energy,
        corrected_energy = report.corrected_energy(),
        virial = report.virial,
        "Evaluation finished."
    );
    Ok(report)
}

fn validate(ensemble: &Ensemble, config: &EvaluationConfig) -> Result<(), EngineError> {
    if ensemble.len() != config.system.atom_count() {
        return Err(EngineError::AtomCountMismatch {
            expected: config.system.atom_count(),
            found: ensemble.len(),
        });
    }
    Ok(())
}

#[cfg(feature = "parallel")]
fn with_thread_pool<R, F>(threads: Option<usize>, op: F) -> Result<R, EngineError>
where
    R: Send,
    F: FnOnce() -> R + Send,
{
    match threads {
        Some(num_threads) => {
            debug!(num_threads, "Building dedicated thread pool.");
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(num_threads)
                .build()
                .map_err(|e| {
                    EngineError::Initialization(format!("Failed to build thread pool: {}", e))
                })?;
            Ok(pool.install(op))
        }
        None => Ok(op()),
    }
}

#[cfg(not(feature = "parallel"))]
fn with_thread_pool<R, F>(threads: Option<usize>, op: F) -> Result<R, EngineError>
where
    F: FnOnce() -> R,
{
    if threads.is_some() {
        warn!("Thread count ignored: built without the `parallel` feature.");
    }
    Ok(op())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::params::{LennardJonesParams, SystemParams};
    use crate::core::models::lattice::CubicLattice;
    use crate::engine::config::{EvaluationConfigBuilder, Schedule};
    use crate::engine::tasks::energy_force::ENERGY_FORCE_PHASE;
    use std::sync::Mutex;

    fn lattice_ensemble(system: &SystemParams) -> Ensemble {
        let lattice = CubicLattice::for_system(system);
        Ensemble::from_positions(&lattice.sites(system.atom_count()))
    }

    fn config(strategy: Strategy, evaluations: usize) -> EvaluationConfig {
        EvaluationConfigBuilder::new()
            .potential(LennardJonesParams::new(1.0, 1.0, 2.5).unwrap())
            .system(SystemParams::from_density(125, 0.6).unwrap())
            .strategy(strategy)
            .schedule(Schedule::Dynamic { chunk: 2 })
            .evaluations(evaluations)
            .build()
            .unwrap()
    }

    #[test]
    fn run_reports_engine_totals_and_long_range_correction() {
        let config = config(Strategy::Vectorized, 1);
        let mut ensemble = lattice_ensemble(&config.system);

        let report = run(&mut ensemble, &config, &ProgressReporter::new()).unwrap();

        assert_eq!(report.atom_count, 125);
        assert_eq!(report.potential_energy, ensemble.potential_energy());
        assert_eq!(report.virial, ensemble.virial());
        assert_eq!(
            report.long_range,
            compute_long_range_correction(&config.potential, &config.system)
        );
        assert_eq!(
            report.corrected_energy(),
            report.potential_energy + report.long_range.energy
        );
        assert!(report.potential_energy < 0.0);
    }

    #[test]
    fn perfect_lattice_has_negligible_net_force() {
        let config = config(Strategy::Parallel, 1);
        let mut ensemble = lattice_ensemble(&config.system);

        let report = run(&mut ensemble, &config, &ProgressReporter::new()).unwrap();

        assert!(report.net_force.norm() < 1e-3);
    }

    #[test]
    fn run_rejects_atom_count_mismatch() {
        let config = config(Strategy::Scalar, 1);
        let sites = CubicLattice::for_system(&config.system).sites(10);
        let mut ensemble = Ensemble::from_positions(&sites);

        let result = run(&mut ensemble, &config, &ProgressReporter::new());

        assert!(matches!(
            result,
            Err(EngineError::AtomCountMismatch {
                expected: 125,
                found: 10
            })
        ));
    }

    #[test]
    fn repeated_evaluations_report_progress_and_timing_signals() {
        let config = config(Strategy::Scalar, 3);
        let mut ensemble = lattice_ensemble(&config.system);
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            events.lock().unwrap().push(event);
        }));

        run(&mut ensemble, &config, &reporter).unwrap();
        drop(reporter);

        let events = events.into_inner().unwrap();
        let starts = events
            .iter()
            .filter(|e| **e == Progress::PhaseStart { name: ENERGY_FORCE_PHASE })
            .count();
        let finishes = events.iter().filter(|e| **e == Progress::PhaseFinish).count();
        let increments = events.iter().filter(|e| **e == Progress::TaskIncrement).count();
        assert_eq!(starts, 3);
        assert_eq!(finishes, 3);
        assert_eq!(increments, 3);
        assert_eq!(events.first(), Some(&Progress::TaskStart { total_steps: 3 }));
        assert_eq!(events.last(), Some(&Progress::TaskFinish));
    }

    #[test]
    fn oversized_cutoff_emits_warning_message() {
        let config = EvaluationConfigBuilder::new()
            .potential(LennardJonesParams::new(1.0, 1.0, 3.0).unwrap())
            .system(SystemParams::from_side(8, 4.0).unwrap())
            .strategy(Strategy::Scalar)
            .build()
            .unwrap();
        let mut ensemble = lattice_ensemble(&config.system);
        let messages = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            if let Progress::Message(message) = event {
                messages.lock().unwrap().push(message);
            }
        }));

        run(&mut ensemble, &config, &reporter).unwrap();
        drop(reporter);

        let messages = messages.into_inner().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("exceeds half the box side"));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn dedicated_thread_pool_matches_global_pool() {
        let mut dedicated = config(Strategy::Parallel, 1);
        dedicated.threads = Some(2);
        let global = config(Strategy::Parallel, 1);

        let mut a = lattice_ensemble(&dedicated.system);
        let mut b = lattice_ensemble(&global.system);
        let ra = run(&mut a, &dedicated, &ProgressReporter::new()).unwrap();
        let rb = run(&mut b, &global, &ProgressReporter::new()).unwrap();

        let tolerance = 1e-4 * rb.potential_energy.abs().max(1.0);
        assert!((ra.potential_energy - rb.potential_energy).abs() <= tolerance);
    }
}
