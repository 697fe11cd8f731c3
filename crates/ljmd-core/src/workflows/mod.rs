//! # Workflows Module
//!
//! High-level entry points for simulation drivers.
//!
//! - **Evaluate Workflow** ([`evaluate`]) - Validates an [`EvaluationConfig`] against an
//!   ensemble, runs the force/energy engine on the requested thread pool and combines the
//!   result with the long-range correction.
//!
//! [`EvaluationConfig`]: crate::engine::config::EvaluationConfig

pub mod evaluate;
