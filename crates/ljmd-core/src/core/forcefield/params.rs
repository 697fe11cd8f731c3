use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ParamError {
    #[error("Parameter '{name}' must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f32 },
    #[error("System must contain at least one atom")]
    NoAtoms,
}

#[derive(Debug, Error)]
pub enum ParamLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

fn require_positive(name: &'static str, value: f32) -> Result<f32, ParamError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ParamError::NotPositive { name, value })
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
struct LennardJonesInput {
    sigma: f32,
    epsilon: f32,
    cutoff: f32,
}

/// Lennard-Jones 12-6 parameters with the powers the pair loop consumes.
///
/// The derived powers are computed once in [`LennardJonesParams::new`] and cannot be set
/// independently, so `sig12 == sigma^12`, `rcut9 == cutoff^9` and friends always hold.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(try_from = "LennardJonesInput")]
pub struct LennardJonesParams {
    sigma: f32,
    epsilon: f32,
    cutoff: f32,
    sig6: f32,
    sig12: f32,
    rcut2: f32,
    rcut3: f32,
    rcut9: f32,
}

impl TryFrom<LennardJonesInput> for LennardJonesParams {
    type Error = ParamError;

    fn try_from(input: LennardJonesInput) -> Result<Self, Self::Error> {
        Self::new(input.sigma, input.epsilon, input.cutoff)
    }
}

impl LennardJonesParams {
    pub fn new(sigma: f32, epsilon: f32, cutoff: f32) -> Result<Self, ParamError> {
        let sigma = require_positive("sigma", sigma)?;
        let epsilon = require_positive("epsilon", epsilon)?;
        let cutoff = require_positive("cutoff", cutoff)?;

        let sig6 = sigma.powi(6);
        let rcut3 = cutoff.powi(3);
        Ok(Self {
            sigma,
            epsilon,
            cutoff,
            sig6,
            sig12: sig6 * sig6,
            rcut2: cutoff * cutoff,
            rcut3,
            rcut9: rcut3 * rcut3 * rcut3,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ParamLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ParamLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ParamLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    #[inline]
    pub fn sigma(&self) -> f32 {
        self.sigma
    }
    #[inline]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }
    #[inline]
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }
    #[inline]
    pub fn sig6(&self) -> f32 {
        self.sig6
    }
    #[inline]
    pub fn sig12(&self) -> f32 {
        self.sig12
    }
    #[inline]
    pub fn rcut2(&self) -> f32 {
        self.rcut2
    }
    #[inline]
    pub fn rcut3(&self) -> f32 {
        self.rcut3
    }
    #[inline]
    pub fn rcut9(&self) -> f32 {
        self.rcut9
    }
}

/// Box geometry and bulk quantities shared by every evaluation of a run.
///
/// `side`, `half_side` and `density` are kept consistent with the atom count by the
/// constructors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemParams {
    side: f32,
    half_side: f32,
    atom_count: usize,
    density: f32,
}

impl SystemParams {
    /// Cubic box whose side follows from `side^3 = atom_count / density`.
    pub fn from_density(atom_count: usize, density: f32) -> Result<Self, ParamError> {
        if atom_count == 0 {
            return Err(ParamError::NoAtoms);
        }
        let density = require_positive("density", density)?;
        let side = (atom_count as f32 / density).cbrt();
        Ok(Self {
            side,
            half_side: 0.5 * side,
            atom_count,
            density,
        })
    }

    pub fn from_side(atom_count: usize, side: f32) -> Result<Self, ParamError> {
        if atom_count == 0 {
            return Err(ParamError::NoAtoms);
        }
        let side = require_positive("side", side)?;
        Ok(Self {
            side,
            half_side: 0.5 * side,
            atom_count,
            density: atom_count as f32 / (side * side * side),
        })
    }

    #[inline]
    pub fn side(&self) -> f32 {
        self.side
    }
    #[inline]
    pub fn half_side(&self) -> f32 {
        self.half_side
    }
    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atom_count
    }
    #[inline]
    pub fn float_atom_count(&self) -> f32 {
        self.atom_count as f32
    }
    #[inline]
    pub fn density(&self) -> f32 {
        self.density
    }
    #[inline]
    pub fn pi(&self) -> f32 {
        std::f32::consts::PI
    }
}
