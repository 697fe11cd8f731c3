//! # Force Field Module
//!
//! Truncated Lennard-Jones 12-6 interactions for a single atom species.
//!
//! ## Key Components
//!
//! - [`params`] - Potential and system parameters with their derived powers
//! - [`potentials`] - Minimum-image folding and the reduced-unit pair term
//! - [`long_range`] - Analytic correction for interactions beyond the cutoff
//! - [`term`] - The transient per-pair contribution
//!
//! ## Reduced units
//!
//! Pair terms are evaluated without the `4ε` (energy) and `24ε` (force, virial) prefactors.
//! The engine applies the prefactors once after all pairs are accumulated.

pub mod long_range;
pub mod params;
pub mod potentials;
pub mod term;
