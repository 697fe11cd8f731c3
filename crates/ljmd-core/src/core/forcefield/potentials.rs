use super::params::LennardJonesParams;
use super::term::PairTerm;

/// Folds a one-dimensional separation into the nearest periodic image.
///
/// Only a single box length is added or removed, so `delta` must lie within
/// `[-3L/2, 3L/2]`. The integrator is responsible for wrapping positions often enough
/// for this to hold. A delta of exactly `±half_box_length` is returned unchanged.
#[inline]
pub fn minimum_image(delta: f32, box_length: f32, half_box_length: f32) -> f32 {
    if delta > half_box_length {
        delta - box_length
    } else if delta < -half_box_length {
        delta + box_length
    } else {
        delta
    }
}

/// Reduced-unit Lennard-Jones term for a pair at squared separation `dis2`.
///
/// Returns `None` beyond the cutoff; a pair at exactly `rcut2` interacts. `dis2` must not be
/// zero.
#[inline]
pub fn lennard_jones_pair(dis2: f32, params: &LennardJonesParams) -> Option<PairTerm> {
    if dis2 > params.rcut2() {
        return None;
    }
    let dis2i = 1.0 / dis2;
    let dis6i = dis2i * dis2i * dis2i;
    let dis12i = dis6i * dis6i;
    let force_scale = dis2i * (2.0 * params.sig12() * dis12i - params.sig6() * dis6i);
    Some(PairTerm {
        energy: params.sig12() * dis12i - params.sig6() * dis6i,
        virial: force_scale * dis2,
        force_scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-6;

    fn f32_approx_equal(a: f32, b: f32) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn minimum_image_wraps_positive_delta_beyond_half_box() {
        assert_eq!(minimum_image(7.0, 10.0, 5.0), -3.0);
    }

    #[test]
    fn minimum_image_wraps_negative_delta_beyond_half_box() {
        assert_eq!(minimum_image(-7.0, 10.0, 5.0), 3.0);
    }

    #[test]
    fn minimum_image_leaves_delta_inside_half_box_unchanged() {
        assert_eq!(minimum_image(3.0, 10.0, 5.0), 3.0);
        assert_eq!(minimum_image(-3.0, 10.0, 5.0), -3.0);
    }

    #[test]
    fn minimum_image_does_not_wrap_exactly_half_box() {
        assert_eq!(minimum_image(5.0, 10.0, 5.0), 5.0);
        assert_eq!(minimum_image(-5.0, 10.0, 5.0), -5.0);
    }

    #[test]
    fn minimum_image_folds_only_once() {
        assert_eq!(minimum_image(17.0, 10.0, 5.0), 7.0);
    }

    #[test]
    fn lennard_jones_pair_at_sigma_has_zero_energy() {
        let params = LennardJonesParams::new(1.0, 1.0, 2.5).unwrap();
        let term = lennard_jones_pair(1.0, &params).unwrap();
        assert!(f32_approx_equal(term.energy, 0.0));
        assert!(f32_approx_equal(term.force_scale, 1.0));
        assert!(f32_approx_equal(term.virial, 1.0));
    }

    #[test]
    fn lennard_jones_pair_force_vanishes_at_potential_minimum() {
        let params = LennardJonesParams::new(1.0, 1.0, 2.5).unwrap();
        let r_min2 = 2.0f32.powf(1.0 / 3.0);
        let term = lennard_jones_pair(r_min2, &params).unwrap();
        assert!(f32_approx_equal(term.force_scale, 0.0));
        assert!(f32_approx_equal(term.energy, -0.25));
    }

    #[test]
    fn lennard_jones_pair_includes_exact_cutoff() {
        let params = LennardJonesParams::new(1.0, 1.0, 2.0).unwrap();
        let term = lennard_jones_pair(params.rcut2(), &params).unwrap();
        let expected = 1.0 / 4096.0 - 1.0 / 64.0;
        assert!(f32_approx_equal(term.energy, expected));
    }

    #[test]
    fn lennard_jones_pair_excludes_beyond_cutoff() {
        let params = LennardJonesParams::new(1.0, 1.0, 2.0).unwrap();
        let just_beyond = f32::from_bits(params.rcut2().to_bits() + 1);
        assert!(lennard_jones_pair(just_beyond, &params).is_none());
    }
}
