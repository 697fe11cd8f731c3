use clap::{Args, Parser, Subcommand, ValueEnum};
use ljmd::engine::config::Strategy;
use serde::Deserialize;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu, William A. Goddard III, Victor Wai Tak Kam",
    version,
    about = "LJMD CLI - Evaluate truncated Lennard-Jones forces, energies and virials for periodic particle systems.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel computation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate forces, potential energy and virial for a particle configuration.
    Evaluate(EvaluateArgs),
    /// Write a simple-cubic lattice of atoms filling a periodic box.
    Lattice(LatticeArgs),
}

/// Accumulation strategy selectable from the command line or the config file.
#[derive(ValueEnum, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyArg {
    Scalar,
    Vectorized,
    Parallel,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Scalar => Strategy::Scalar,
            StrategyArg::Vectorized => Strategy::Vectorized,
            StrategyArg::Parallel => Strategy::Parallel,
        }
    }
}

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Path to the configuration file in TOML format.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub config: PathBuf,

    /// Path to a CSV file with `x,y,z` columns.
    /// A simple-cubic lattice is generated when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Write per-atom forces as CSV to this path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Override the accumulation strategy from the config file.
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Override the dynamic schedule chunk size from the config file.
    #[arg(long, value_name = "INT")]
    pub chunk_size: Option<usize>,

    /// Override the number of back-to-back evaluations.
    #[arg(short = 'n', long, value_name = "INT")]
    pub evaluations: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S potential.cutoff=3.0
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `lattice` subcommand.
#[derive(Args, Debug)]
pub struct LatticeArgs {
    /// Number of atoms to place.
    #[arg(short = 'n', long, required = true, value_name = "INT")]
    pub atoms: usize,

    /// Number density of the system; determines the box side.
    #[arg(short, long, required = true, value_name = "FLOAT")]
    pub density: f32,

    /// Path for the output CSV file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}
