use crate::core::forcefield::params::SystemParams;
use nalgebra::Point3;

/// Simple-cubic arrangement filling a periodic box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicLattice {
    cells_per_side: usize,
    spacing: f32,
}

impl CubicLattice {
    /// Smallest lattice with at least `system.atom_count()` sites spanning the box.
    pub fn for_system(system: &SystemParams) -> Self {
        let n = system.atom_count();
        let mut cells_per_side = (n as f64).cbrt().round() as usize;
        while cells_per_side.pow(3) < n {
            cells_per_side += 1;
        }
        let cells_per_side = cells_per_side.max(1);
        Self {
            cells_per_side,
            spacing: system.side() / cells_per_side as f32,
        }
    }

    #[inline]
    pub fn cells_per_side(&self) -> usize {
        self.cells_per_side
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// The first `count` sites in x-major order, offset by half a spacing from the origin.
    pub fn sites(&self, count: usize) -> Vec<Point3<f32>> {
        let m = self.cells_per_side;
        let offset = 0.5 * self.spacing;
        let mut sites = Vec::with_capacity(count.min(m * m * m));
        'fill: for i in 0..m {
            for j in 0..m {
                for k in 0..m {
                    if sites.len() == count {
                        break 'fill;
                    }
                    sites.push(Point3::new(
                        offset + self.spacing * i as f32,
                        offset + self.spacing * j as f32,
                        offset + self.spacing * k as f32,
                    ));
                }
            }
        }
        sites
    }
}
