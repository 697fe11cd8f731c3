//! # LJMD Core Library
//!
//! A short-range Lennard-Jones force and energy engine for particle simulations under
//! periodic boundary conditions, together with the analytic long-range tail correction.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Ensemble`, lattice builders),
//!   pure potential functions (`minimum_image`, the Lennard-Jones pair term, the long-range
//!   correction), parameter structures and positions I/O.
//!
//! - **[`engine`]: The Logic Core.** The all-pairs force/energy/virial evaluator with its
//!   scalar, vectorized and parallel accumulation strategies, its configuration and the
//!   start/stop timing hook.
//!
//! - **[`workflows`]: The Public API.** Drivers call [`workflows::evaluate::run`] to validate a
//!   configuration against an ensemble, evaluate it, and receive the corrected totals.

pub mod core;
pub mod engine;
pub mod workflows;
