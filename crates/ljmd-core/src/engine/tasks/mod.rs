//! Computational tasks run by the engine.
//!
//! [`energy_force`] evaluates the truncated Lennard-Jones interaction over all atom pairs and
//! overwrites the ensemble's forces, potential energy and virial.

pub mod energy_force;
