//! # Engine Module
//!
//! The all-pairs Lennard-Jones evaluator and everything needed to drive it.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Potential/system parameters, accumulation strategy,
//!   work schedule and worker count for an evaluation run
//! - **Progress Monitoring** ([`progress`]) - Start/stop signals around each evaluation that a
//!   caller can turn into timing or progress output
//! - **Error Handling** ([`error`]) - Errors raised while preparing an evaluation
//! - **Tasks** ([`tasks`]) - The force/energy/virial computation itself
//!
//! ## Accumulation strategies
//!
//! Each unordered pair `(i, j)`, `i < j`, is visited once and its force is applied with opposite
//! signs to both atoms. The parallel strategy distributes rows `i` over a rayon pool; every
//! worker fills private scratch buffers for its row and then folds the row into the shared
//! forces under a lock.

pub mod config;
pub mod error;
pub mod progress;
pub mod tasks;

pub use tasks::energy_force::{compute_energy_and_force, compute_energy_and_force_with};
