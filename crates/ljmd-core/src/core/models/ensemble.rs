use crate::core::forcefield::term::EnergyTotals;
use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EnsembleError {
    #[error("Coordinate arrays differ in length: x={x}, y={y}, z={z}")]
    LengthMismatch { x: usize, y: usize, z: usize },
}

/// Positions, forces and the two global scalars of a particle system.
///
/// Stored as separate coordinate arrays so the pair loop walks contiguous memory per axis.
/// Positions belong to the caller; forces, potential energy and virial are overwritten by
/// every engine evaluation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ensemble {
    xx: Vec<f32>,
    yy: Vec<f32>,
    zz: Vec<f32>,
    fx: Vec<f32>,
    fy: Vec<f32>,
    fz: Vec<f32>,
    totals: EnergyTotals,
}

/// Read-only coordinate slices handed to the pair loop.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PositionView<'a> {
    pub xx: &'a [f32],
    pub yy: &'a [f32],
    pub zz: &'a [f32],
}

/// Mutable write targets of an evaluation: the force arrays and the global scalars.
#[derive(Debug)]
pub(crate) struct ForceAccumulator<'a> {
    pub fx: &'a mut [f32],
    pub fy: &'a mut [f32],
    pub fz: &'a mut [f32],
    pub totals: &'a mut EnergyTotals,
}

impl Ensemble {
    pub fn new(xx: Vec<f32>, yy: Vec<f32>, zz: Vec<f32>) -> Result<Self, EnsembleError> {
        if xx.len() != yy.len() || xx.len() != zz.len() {
            return Err(EnsembleError::LengthMismatch {
                x: xx.len(),
                y: yy.len(),
                z: zz.len(),
            });
        }
        let n = xx.len();
        Ok(Self {
            xx,
            yy,
            zz,
            fx: vec![0.0; n],
            fy: vec![0.0; n],
            fz: vec![0.0; n],
            totals: EnergyTotals::default(),
        })
    }

    pub fn from_positions(positions: &[Point3<f32>]) -> Self {
        let n = positions.len();
        let mut xx = Vec::with_capacity(n);
        let mut yy = Vec::with_capacity(n);
        let mut zz = Vec::with_capacity(n);
        for p in positions {
            xx.push(p.x);
            yy.push(p.y);
            zz.push(p.z);
        }
        Self {
            xx,
            yy,
            zz,
            fx: vec![0.0; n],
            fy: vec![0.0; n],
            fz: vec![0.0; n],
            totals: EnergyTotals::default(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.xx.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xx.is_empty()
    }

    pub fn position(&self, index: usize) -> Option<Point3<f32>> {
        (index < self.len()).then(|| Point3::new(self.xx[index], self.yy[index], self.zz[index]))
    }

    pub fn force(&self, index: usize) -> Option<Vector3<f32>> {
        (index < self.len()).then(|| Vector3::new(self.fx[index], self.fy[index], self.fz[index]))
    }

    pub fn positions(&self) -> impl Iterator<Item = Point3<f32>> + '_ {
        self.xx
            .iter()
            .zip(&self.yy)
            .zip(&self.zz)
            .map(|((&x, &y), &z)| Point3::new(x, y, z))
    }

    pub fn forces(&self) -> impl Iterator<Item = Vector3<f32>> + '_ {
        self.fx
            .iter()
            .zip(&self.fy)
            .zip(&self.fz)
            .map(|((&x, &y), &z)| Vector3::new(x, y, z))
    }

    /// Returns `false` if `index` is out of range.
    pub fn set_position(&mut self, index: usize, position: Point3<f32>) -> bool {
        if index >= self.len() {
            return false;
        }
        self.xx[index] = position.x;
        self.yy[index] = position.y;
        self.zz[index] = position.z;
        true
    }

    /// Coordinate arrays for an external integrator.
    pub fn positions_mut(&mut self) -> (&mut [f32], &mut [f32], &mut [f32]) {
        (
            self.xx.as_mut_slice(),
            self.yy.as_mut_slice(),
            self.zz.as_mut_slice(),
        )
    }

    #[inline]
    pub fn potential_energy(&self) -> f32 {
        self.totals.energy
    }

    #[inline]
    pub fn virial(&self) -> f32 {
        self.totals.virial
    }

    /// Sum of all per-atom forces, accumulated in double precision.
    pub fn net_force(&self) -> Vector3<f64> {
        self.forces()
            .fold(Vector3::zeros(), |acc, f| acc + f.cast::<f64>())
    }

    pub(crate) fn reset_accumulators(&mut self) {
        self.fx.fill(0.0);
        self.fy.fill(0.0);
        self.fz.fill(0.0);
        self.totals = EnergyTotals::default();
    }

    pub(crate) fn split_mut(&mut self) -> (PositionView<'_>, ForceAccumulator<'_>) {
        (
            PositionView {
                xx: &self.xx,
                yy: &self.yy,
                zz: &self.zz,
            },
            ForceAccumulator {
                fx: &mut self.fx,
                fy: &mut self.fy,
                fz: &mut self.fz,
                totals: &mut self.totals,
            },
        )
    }

    pub(crate) fn apply_prefactors(&mut self, energy_factor: f32, force_factor: f32) {
        for f in self
            .fx
            .iter_mut()
            .chain(self.fy.iter_mut())
            .chain(self.fz.iter_mut())
        {
            *f *= force_factor;
        }
        self.totals.energy *= energy_factor;
        self.totals.virial *= force_factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_mismatched_coordinate_arrays() {
        let result = Ensemble::new(vec![0.0; 3], vec![0.0; 2], vec![0.0; 3]);
        assert_eq!(
            result,
            Err(EnsembleError::LengthMismatch { x: 3, y: 2, z: 3 })
        );
    }

    #[test]
    fn new_starts_with_zeroed_forces_and_scalars() {
        let ensemble = Ensemble::new(vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]).unwrap();
        assert_eq!(ensemble.len(), 2);
        assert_eq!(ensemble.force(1), Some(Vector3::zeros()));
        assert_eq!(ensemble.potential_energy(), 0.0);
        assert_eq!(ensemble.virial(), 0.0);
    }

    #[test]
    fn from_positions_splits_points_into_axes() {
        let ensemble = Ensemble::from_positions(&[
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(4.0, 5.0, 6.0),
        ]);
        assert_eq!(ensemble.position(1), Some(Point3::new(4.0, 5.0, 6.0)));
        assert_eq!(ensemble.position(2), None);
        assert_eq!(ensemble.positions().count(), 2);
    }

    #[test]
    fn set_position_updates_in_range_and_rejects_out_of_range() {
        let mut ensemble = Ensemble::from_positions(&[Point3::origin()]);
        assert!(ensemble.set_position(0, Point3::new(1.0, 1.0, 1.0)));
        assert!(!ensemble.set_position(1, Point3::new(1.0, 1.0, 1.0)));
        assert_eq!(ensemble.position(0), Some(Point3::new(1.0, 1.0, 1.0)));
    }

    #[test]
    fn reset_and_prefactors_act_on_all_accumulators() {
        let mut ensemble = Ensemble::from_positions(&[Point3::origin(), Point3::origin()]);
        {
            let (_, acc) = ensemble.split_mut();
            acc.fx[0] = 1.0;
            acc.fy[1] = -2.0;
            acc.totals.energy = 3.0;
            acc.totals.virial = 4.0;
        }
        ensemble.apply_prefactors(2.0, 10.0);
        assert_eq!(ensemble.force(0), Some(Vector3::new(10.0, 0.0, 0.0)));
        assert_eq!(ensemble.force(1), Some(Vector3::new(0.0, -20.0, 0.0)));
        assert_eq!(ensemble.potential_energy(), 6.0);
        assert_eq!(ensemble.virial(), 40.0);
        assert_eq!(ensemble.net_force(), Vector3::new(10.0, -20.0, 0.0));

        ensemble.reset_accumulators();
        assert!(ensemble.forces().all(|f| f == Vector3::zeros()));
        assert_eq!(ensemble.potential_energy(), 0.0);
        assert_eq!(ensemble.virial(), 0.0);
    }
}
