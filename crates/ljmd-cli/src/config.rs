pub mod defaults;

use crate::cli::{EvaluateArgs, StrategyArg};
use crate::error::{CliError, Result};
use clap::ValueEnum;
use defaults::DefaultsConfig;
use ljmd::core::forcefield::params::{LennardJonesParams, SystemParams};
use ljmd::engine::config::{EvaluationConfig, EvaluationConfigBuilder, Schedule};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialPotentialConfig {
    path: Option<PathBuf>,
    sigma: Option<f32>,
    epsilon: Option<f32>,
    cutoff: Option<f32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialSystemConfig {
    atoms: Option<usize>,
    density: Option<f32>,
    side: Option<f32>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialEngineConfig {
    strategy: Option<StrategyArg>,
    #[serde(rename = "chunk-size")]
    chunk_size: Option<usize>,
    threads: Option<usize>,
    evaluations: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialEvaluationConfig {
    potential: Option<PartialPotentialConfig>,
    system: Option<PartialSystemConfig>,
    engine: Option<PartialEngineConfig>,
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid value for {}: {}", key, value))
    })
}

impl PartialEvaluationConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Combines file values, CLI overrides and defaults into a core configuration.
    ///
    /// `loaded_atoms` is the atom count of a positions file, used when `system.atoms` is unset.
    pub fn merge_with_cli(
        mut self,
        args: &EvaluateArgs,
        loaded_atoms: Option<usize>,
    ) -> Result<EvaluationConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = DefaultsConfig::default();

        let potential_config = self.potential.take().unwrap_or_default();
        let system_config = self.system.take().unwrap_or_default();
        let engine_config = self.engine.take().unwrap_or_default();

        let potential = self.resolve_potential(&potential_config, &defaults)?;

        let atoms = system_config.atoms.or(loaded_atoms).ok_or_else(|| {
            CliError::Config(
                "A value for 'system.atoms' is required when no positions file is given."
                    .to_string(),
            )
        })?;
        let system = match (system_config.side, system_config.density) {
            (Some(_), Some(_)) => {
                return Err(CliError::Config(
                    "Specify either 'system.side' or 'system.density', not both.".to_string(),
                ));
            }
            (Some(side), None) => SystemParams::from_side(atoms, side)?,
            (None, density) => {
                SystemParams::from_density(atoms, density.unwrap_or(defaults.density))?
            }
        };

        let strategy = args
            .strategy
            .or(engine_config.strategy)
            .map(Into::into)
            .unwrap_or(defaults.strategy);
        let schedule = match args.chunk_size.or(engine_config.chunk_size) {
            Some(chunk) => Schedule::Dynamic { chunk },
            None => Schedule::Adaptive,
        };
        let evaluations = args
            .evaluations
            .or(engine_config.evaluations)
            .unwrap_or(defaults.evaluations);

        let mut builder = EvaluationConfigBuilder::new()
            .potential(potential)
            .system(system)
            .strategy(strategy)
            .schedule(schedule)
            .evaluations(evaluations);
        if let Some(threads) = engine_config.threads {
            builder = builder.threads(threads);
        }
        Ok(builder.build()?)
    }

    fn resolve_potential(
        &self,
        config: &PartialPotentialConfig,
        defaults: &DefaultsConfig,
    ) -> Result<LennardJonesParams> {
        let from_file = match &config.path {
            Some(path) => {
                let path = match &self.base_dir {
                    Some(base) if path.is_relative() => base.join(path),
                    _ => path.clone(),
                };
                debug!("Loading potential parameters from {:?}", path);
                Some(LennardJonesParams::load(&path)?)
            }
            None => None,
        };

        let sigma = config
            .sigma
            .or(from_file.map(|p| p.sigma()))
            .unwrap_or(defaults.sigma);
        let epsilon = config
            .epsilon
            .or(from_file.map(|p| p.epsilon()))
            .unwrap_or(defaults.epsilon);
        let cutoff = config
            .cutoff
            .or(from_file.map(|p| p.cutoff()))
            .unwrap_or(defaults.cutoff);

        Ok(LennardJonesParams::new(sigma, epsilon, cutoff)?)
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "potential.sigma" => {
                    self.potential.get_or_insert_with(Default::default).sigma =
                        Some(parse_value(key, value_str)?);
                }
                "potential.epsilon" => {
                    self.potential.get_or_insert_with(Default::default).epsilon =
                        Some(parse_value(key, value_str)?);
                }
                "potential.cutoff" => {
                    self.potential.get_or_insert_with(Default::default).cutoff =
                        Some(parse_value(key, value_str)?);
                }
                "system.atoms" => {
                    self.system.get_or_insert_with(Default::default).atoms =
                        Some(parse_value(key, value_str)?);
                }
                "system.density" => {
                    self.system.get_or_insert_with(Default::default).density =
                        Some(parse_value(key, value_str)?);
                }
                "system.side" => {
                    self.system.get_or_insert_with(Default::default).side =
                        Some(parse_value(key, value_str)?);
                }
                "engine.strategy" => {
                    let strategy = StrategyArg::from_str(value_str, true).map_err(|_| {
                        CliError::Config(format!("Invalid value for {}: {}", key, value_str))
                    })?;
                    self.engine.get_or_insert_with(Default::default).strategy = Some(strategy);
                }
                "engine.chunk-size" => {
                    self.engine.get_or_insert_with(Default::default).chunk_size =
                        Some(parse_value(key, value_str)?);
                }
                "engine.threads" => {
                    self.engine.get_or_insert_with(Default::default).threads =
                        Some(parse_value(key, value_str)?);
                }
                "engine.evaluations" => {
                    self.engine.get_or_insert_with(Default::default).evaluations =
                        Some(parse_value(key, value_str)?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
