use crate::cli::LatticeArgs;
use crate::error::Result;
use ljmd::core::{
    forcefield::params::SystemParams, io::positions, models::lattice::CubicLattice,
};
use tracing::info;

pub fn run(args: LatticeArgs) -> Result<()> {
    let system = SystemParams::from_density(args.atoms, args.density)?;
    let lattice = CubicLattice::for_system(&system);
    info!(
        atoms = args.atoms,
        side = system.side(),
        cells_per_side = lattice.cells_per_side(),
        "Generating simple-cubic lattice."
    );

    let sites = lattice.sites(args.atoms);
    positions::write_positions_to_path(&sites, &args.output)?;

    println!(
        "✓ {} atoms written to {} (box side {:.6}).",
        sites.len(),
        args.output.display(),
        system.side()
    );
    Ok(())
}
