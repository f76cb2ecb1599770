//! clusterctl - OpenCluster instrument cluster driver
//!
//! Runs scripted driving scenarios through the cluster core and prints what
//! the dashboard would show, either as text or as JSON lines.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod completion;
mod error;
mod output;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::{ConfigCommands, RunArgs};

#[derive(Parser)]
#[command(name = "clusterctl")]
#[command(about = "OpenCluster driver - run scenarios through the instrument cluster core")]
#[command(version)]
#[command(long_about = "
clusterctl drives the OpenCluster instrument cluster with scripted inputs
and prints the resulting dashboard state: speed, gear, alerts, forward
collision warning, inclinometer, turn signals and terrain mode.

Use --json for one JSON object per line, suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging; in `run`, also prints every bus event
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scripted scenario and print snapshots
    Run(RunArgs),

    /// Configuration commands
    #[command(subcommand)]
    Config(ConfigCommands),

    /// List terrain modes and their panel order
    Modes,

    /// List scripted scenarios
    Scenarios,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match execute_command(&cli) {
        Ok(()) => ExitCode::from(error::EXIT_OK),
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            ExitCode::from(error::exit_code(&e))
        }
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Run(args) => commands::run::execute(args, cli.json, cli.verbose > 0),
        Commands::Config(cmd) => commands::config::execute(cmd, cli.json),
        Commands::Modes => commands::modes::execute_modes(cli.json),
        Commands::Scenarios => commands::modes::execute_scenarios(cli.json),
        Commands::Completion { shell } => {
            completion::generate_completion(*shell);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{ConfigFormatArg, TurnSignalArg};
    use clap::Parser;
    use opencluster::contracts::GearSelector;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    // --- Global flag parsing ---

    #[test]
    fn parse_run_defaults() -> TestResult {
        let cli = Cli::try_parse_from(["clusterctl", "run"])?;
        assert!(!cli.json);
        assert_eq!(cli.verbose, 0);
        let Commands::Run(args) = cli.command else {
            return Err("expected run".into());
        };
        assert_eq!(args.scenario, "launch");
        assert_eq!(args.seconds, None);
        assert!((args.dt - 0.05).abs() < f32::EPSILON);
        assert_eq!(args.every, 10);
        assert_eq!(args.selector, GearSelector::Drive);
        assert!(args.mode.is_none());
        assert!(args.turn_signal.is_none());
        assert!(args.ambient_light.is_none());
        Ok(())
    }

    #[test]
    fn parse_global_json_flag_after_subcommand() -> TestResult {
        let cli = Cli::try_parse_from(["clusterctl", "modes", "--json"])?;
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Modes));
        Ok(())
    }

    #[test]
    fn parse_verbose_count() -> TestResult {
        let cli = Cli::try_parse_from(["clusterctl", "-vv", "scenarios"])?;
        assert_eq!(cli.verbose, 2);
        Ok(())
    }

    // --- run ---

    #[test]
    fn parse_run_all_options() -> TestResult {
        let cli = Cli::try_parse_from([
            "clusterctl",
            "run",
            "--scenario",
            "closing",
            "--seconds",
            "12.5",
            "--dt",
            "0.02",
            "--every",
            "5",
            "--selector",
            "n",
            "--mode",
            "Snow",
            "--speed-limit",
            "80",
            "--turn-signal",
            "hazard",
            "--ambient-light",
            "0.25",
        ])?;
        let Commands::Run(args) = cli.command else {
            return Err("expected run".into());
        };
        assert_eq!(args.scenario, "closing");
        assert_eq!(args.seconds, Some(12.5));
        assert_eq!(args.every, 5);
        assert_eq!(args.selector, GearSelector::Neutral);
        assert_eq!(args.mode.as_deref(), Some("Snow"));
        assert_eq!(args.speed_limit, Some(80.0));
        assert_eq!(args.turn_signal, Some(TurnSignalArg::Hazard));
        assert_eq!(args.ambient_light, Some(0.25));
        Ok(())
    }

    #[test]
    fn parse_run_rejects_bad_selector() {
        let result = Cli::try_parse_from(["clusterctl", "run", "--selector", "X"]);
        assert!(matches!(result, Err(_)));
    }

    // --- config ---

    #[test]
    fn parse_config_dump_json() -> TestResult {
        let cli = Cli::try_parse_from(["clusterctl", "config", "dump", "--format", "json"])?;
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Dump {
                config: None,
                format: ConfigFormatArg::Json
            })
        ));
        Ok(())
    }

    #[test]
    fn parse_config_validate_requires_path() {
        let result = Cli::try_parse_from(["clusterctl", "config", "validate"]);
        assert!(matches!(result, Err(_)));
    }

    #[test]
    fn parse_completion_shell() -> TestResult {
        let cli = Cli::try_parse_from(["clusterctl", "completion", "bash"])?;
        assert!(matches!(
            cli.command,
            Commands::Completion {
                shell: clap_complete::Shell::Bash
            }
        ));
        Ok(())
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
