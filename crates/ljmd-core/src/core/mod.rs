//! # Core Module
//!
//! Fundamental building blocks for evaluating short-range pair interactions in a periodic box.
//!
//! - **Particle State** ([`models`]) - The structure-of-arrays `Ensemble` and lattice builders
//! - **Potential** ([`forcefield`]) - Lennard-Jones parameters, pair terms, minimum image and
//!   the long-range tail correction
//! - **File I/O** ([`io`]) - Reading positions and writing per-atom forces as CSV

pub mod forcefield;
pub mod io;
pub mod models;
