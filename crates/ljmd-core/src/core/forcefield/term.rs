use std::ops::{Add, AddAssign};

/// Reduced-unit contribution of a single `(i, j)` pair.
///
/// `force_scale` multiplies the minimum-image separation vector to give the force on atom
/// `i`; atom `j` receives the negation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PairTerm {
    pub energy: f32,
    pub virial: f32,
    pub force_scale: f32,
}

/// Running energy and virial sums of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyTotals {
    pub energy: f32,
    pub virial: f32,
}

impl EnergyTotals {
    pub fn new(energy: f32, virial: f32) -> Self {
        Self { energy, virial }
    }
}

impl AddAssign<PairTerm> for EnergyTotals {
    #[inline]
    fn add_assign(&mut self, rhs: PairTerm) {
        self.energy += rhs.energy;
        self.virial -= rhs.virial;
    }
}

impl Add<PairTerm> for EnergyTotals {
    type Output = Self;

    fn add(mut self, rhs: PairTerm) -> Self::Output {
        self += rhs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adding_pair_term_adds_energy_and_subtracts_virial() {
        let totals = EnergyTotals::new(1.0, 1.0)
            + PairTerm {
                energy: 2.0,
                virial: 3.0,
                force_scale: 9.0,
            };
        assert_eq!(totals, EnergyTotals::new(3.0, -2.0));
    }

    #[test]
    fn default_initializes_all_fields_to_zero() {
        let totals = EnergyTotals::default();
        assert_eq!(totals.energy, 0.0);
        assert_eq!(totals.virial, 0.0);
    }
}
