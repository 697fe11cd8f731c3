use crate::cli::EvaluateArgs;
use crate::config::PartialEvaluationConfig;
use crate::error::Result;
use crate::utils::progress::{CliProgressHandler, TimingSummary};
use ljmd::{
    core::{
        io::positions,
        models::{ensemble::Ensemble, lattice::CubicLattice},
    },
    engine::progress::ProgressReporter,
    workflows::{self, evaluate::EvaluationReport},
};
use tracing::info;

pub fn run(args: EvaluateArgs) -> Result<()> {
    let partial_config = PartialEvaluationConfig::from_file(&args.config)?;

    let loaded = match &args.input {
        Some(path) => {
            info!("Loading positions from {:?}", path);
            Some(positions::read_from_path(path)?)
        }
        None => None,
    };

    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args, loaded.as_ref().map(Ensemble::len))?;

    let mut ensemble = match loaded {
        Some(ensemble) => ensemble,
        None => {
            let lattice = CubicLattice::for_system(&config.system);
            info!(
                cells_per_side = lattice.cells_per_side(),
                spacing = lattice.spacing(),
                "No input positions given; generating a simple-cubic lattice."
            );
            Ensemble::from_positions(&lattice.sites(config.system.atom_count()))
        }
    };

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Evaluating {} atoms ({} strategy, {} evaluation(s))...",
        ensemble.len(),
        config.strategy,
        config.evaluations
    );
    info!("Invoking the core evaluation workflow...");
    let report = workflows::evaluate::run(&mut ensemble, &config, &reporter)?;
    drop(reporter);

    print_report(&report, &progress_handler.timing());

    if let Some(output) = &args.output {
        info!("Writing per-atom forces to {:?}", output);
        positions::write_forces_to_path(&ensemble, output)?;
        println!("✓ Forces written to: {}", output.display());
    }

    Ok(())
}

fn print_report(report: &EvaluationReport, timing: &TimingSummary) {
    let net = report.net_force;
    println!("  Potential energy:      {:>16.6}", report.potential_energy);
    println!("  Long-range energy:     {:>16.6}", report.long_range.energy);
    println!("  Corrected energy:      {:>16.6}", report.corrected_energy());
    println!(
        "  Energy per atom:       {:>16.6}",
        report.corrected_energy_per_atom()
    );
    println!("  Virial:                {:>16.6}", report.virial);
    println!("  Long-range force:      {:>16.6}", report.long_range.force);
    println!(
        "  Net force:             ({:.3e}, {:.3e}, {:.3e})",
        net.x, net.y, net.z
    );
    if let Some(mean) = timing.mean() {
        println!(
            "  Timing:                {:.3?} total, {:.3?} per evaluation",
            timing.total, mean
        );
    }
}
