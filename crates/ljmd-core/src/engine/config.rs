use crate::core::forcefield::params::{LennardJonesParams, SystemParams};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// How pair contributions are folded into the shared force arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Single thread, each pair written straight into both atoms' forces.
    Scalar,
    /// Single thread, rows computed into scratch buffers and applied in a second pass.
    Vectorized,
    /// Rows distributed over a rayon pool with a locked reduction per row.
    /// Falls back to [`Strategy::Vectorized`] without the `parallel` feature.
    Parallel,
}

impl Default for Strategy {
    fn default() -> Self {
        if cfg!(feature = "parallel") {
            Strategy::Parallel
        } else {
            Strategy::Vectorized
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::Scalar => "scalar",
            Strategy::Vectorized => "vectorized",
            Strategy::Parallel => "parallel",
        };
        f.write_str(name)
    }
}

/// Distribution of rows over workers for [`Strategy::Parallel`].
///
/// Rows shrink as `i` grows, so equal static chunks would leave workers idle near the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Schedule {
    /// Rayon's adaptive splitting with work stealing.
    #[default]
    Adaptive,
    /// Every task takes at most `chunk` consecutive rows.
    Dynamic { chunk: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub potential: LennardJonesParams,
    pub system: SystemParams,
    pub strategy: Strategy,
    pub schedule: Schedule,
    /// Worker count for a dedicated pool; `None` uses the global rayon pool.
    pub threads: Option<usize>,
    /// Number of back-to-back evaluations, for timing runs.
    pub evaluations: usize,
}

#[derive(Default)]
pub struct EvaluationConfigBuilder {
    potential: Option<LennardJonesParams>,
    system: Option<SystemParams>,
    strategy: Option<Strategy>,
    schedule: Option<Schedule>,
    threads: Option<usize>,
    evaluations: Option<usize>,
}

impl EvaluationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn potential(mut self, potential: LennardJonesParams) -> Self {
        self.potential = Some(potential);
        self
    }
    pub fn system(mut self, system: SystemParams) -> Self {
        self.system = Some(system);
        self
    }
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
    pub fn evaluations(mut self, evaluations: usize) -> Self {
        self.evaluations = Some(evaluations);
        self
    }

    pub fn build(self) -> Result<EvaluationConfig, ConfigError> {
        let schedule = self.schedule.unwrap_or_default();
        if let Schedule::Dynamic { chunk: 0 } = schedule {
            return Err(ConfigError::InvalidParameter {
                name: "schedule",
                reason: "dynamic chunk size must be at least 1".to_string(),
            });
        }
        if self.threads == Some(0) {
            return Err(ConfigError::InvalidParameter {
                name: "threads",
                reason: "thread count must be at least 1".to_string(),
            });
        }
        let evaluations = self.evaluations.unwrap_or(1);
        if evaluations == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "evaluations",
                reason: "at least one evaluation is required".to_string(),
            });
        }

        Ok(EvaluationConfig {
            potential: self
                .potential
                .ok_or(ConfigError::MissingParameter("potential"))?,
            system: self.system.ok_or(ConfigError::MissingParameter("system"))?,
            strategy: self.strategy.unwrap_or_default(),
            schedule,
            threads: self.threads,
            evaluations,
        })
    }
}
