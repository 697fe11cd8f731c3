use super::params::{LennardJonesParams, SystemParams};

/// Analytic tail correction for interactions truncated at the cutoff.
///
/// Assumes a uniform density beyond the cutoff radius. The engine never applies it; the
/// driver adds it to the evaluated totals.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LongRangeCorrection {
    pub energy: f32,
    pub force: f32,
}

#[inline]
fn tail_integral(params: &LennardJonesParams) -> f32 {
    params.sig12() / (9.0 * params.rcut9()) - params.sig6() / (6.0 * params.rcut3())
}

pub fn compute_long_range_correction(
    params: &LennardJonesParams,
    system: &SystemParams,
) -> LongRangeCorrection {
    let tail = tail_integral(params);

    let energy_prefactor =
        system.float_atom_count() * 8.0 * params.epsilon() * system.pi() * system.density();
    let force_prefactor = 96.0 * params.epsilon() * system.pi() * system.density();

    LongRangeCorrection {
        energy: energy_prefactor * tail,
        force: -force_prefactor * tail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn approx_eq(a: f32, b: f64) -> bool {
        (a as f64 - b).abs() <= 1e-5 * b.abs().max(1e-6)
    }

    #[test]
    fn two_atom_correction_matches_closed_form() {
        let params = LennardJonesParams::new(1.0, 1.0, 2.5).unwrap();
        let system = SystemParams::from_side(2, 5.0).unwrap();

        let correction = compute_long_range_correction(&params, &system);

        let rho = 2.0 / 125.0;
        let rc: f64 = 2.5;
        let tail = 1.0 / (9.0 * rc.powi(9)) - 1.0 / (6.0 * rc.powi(3));
        let expected_energy = 8.0 * 2.0 * PI * rho * tail;
        let expected_force = -96.0 * PI * rho * tail;

        assert!(approx_eq(correction.energy, expected_energy));
        assert!(approx_eq(correction.force, expected_force));
    }

    #[test]
    fn correction_is_attractive_for_typical_cutoff() {
        let params = LennardJonesParams::new(1.0, 1.0, 2.5).unwrap();
        let system = SystemParams::from_density(108, 0.8442).unwrap();
        let correction = compute_long_range_correction(&params, &system);
        assert!(correction.energy < 0.0);
        assert!(correction.force > 0.0);
    }

    #[test]
    fn correction_scales_linearly_with_epsilon() {
        let system = SystemParams::from_density(64, 0.5).unwrap();
        let base = compute_long_range_correction(
            &LennardJonesParams::new(1.2, 1.0, 3.0).unwrap(),
            &system,
        );
        let doubled = compute_long_range_correction(
            &LennardJonesParams::new(1.2, 2.0, 3.0).unwrap(),
            &system,
        );
        assert!(approx_eq(doubled.energy, 2.0 * base.energy as f64));
        assert!(approx_eq(doubled.force, 2.0 * base.force as f64));
    }
}
