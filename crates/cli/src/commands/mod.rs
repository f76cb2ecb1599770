//! Command implementations for clusterctl

pub mod config;
pub mod modes;
pub mod run;

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use opencluster::contracts::{GearSelector, TurnSignalState};
use opencluster::{ClusterConfig, ClusterResult};

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Scenario to drive (launch, cruise, brake_test, slalom, closing)
    #[arg(short, long, default_value = "launch")]
    pub scenario: String,

    /// Simulated seconds; defaults to the scripted length plus 5 s
    #[arg(long)]
    pub seconds: Option<f32>,

    /// Time step in seconds
    #[arg(long, default_value_t = 0.05)]
    pub dt: f32,

    /// Print a snapshot every N ticks
    #[arg(long, default_value_t = 10)]
    pub every: u32,

    /// Gear selector position at start (P, R, N, D)
    #[arg(long, default_value = "D")]
    pub selector: GearSelector,

    /// Terrain mode at start; overrides the config file
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Speed limit in km/h; overrides the config file
    #[arg(long)]
    pub speed_limit: Option<f32>,

    /// Turn signal at start
    #[arg(long, value_enum)]
    pub turn_signal: Option<TurnSignalArg>,

    /// Ambient light level in [0, 1]; turns on automatic day/night theme
    #[arg(long)]
    pub ambient_light: Option<f32>,

    /// Config file (YAML or JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Dump {
        /// Config file to load instead of the defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = ConfigFormatArg::Yaml)]
        format: ConfigFormatArg,
    },

    /// Validate a config file
    Validate {
        /// Config file (YAML or JSON)
        path: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormatArg {
    Yaml,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnSignalArg {
    Left,
    Right,
    Hazard,
}

impl From<TurnSignalArg> for TurnSignalState {
    fn from(arg: TurnSignalArg) -> Self {
        match arg {
            TurnSignalArg::Left => TurnSignalState::Left,
            TurnSignalArg::Right => TurnSignalState::Right,
            TurnSignalArg::Hazard => TurnSignalState::Hazard,
        }
    }
}

/// Load `path`, or the defaults when absent.
pub(crate) fn load_config(path: Option<&std::path::Path>) -> ClusterResult<ClusterConfig> {
    match path {
        Some(path) => ClusterConfig::load(path),
        None => Ok(ClusterConfig::default()),
    }
}
