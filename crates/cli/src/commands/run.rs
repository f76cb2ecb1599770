//! Scenario runner

use anyhow::Result;
use opencluster::bus::EventRecorder;
use opencluster::telemetry::math::MIN_DT;
use opencluster::{Cluster, Scenario};
use tracing::{debug, info};

use crate::commands::{RunArgs, load_config};
use crate::error::CliError;
use crate::output;

/// Seconds simulated past the end of the script when `--seconds` is absent.
const RUN_OUT_SECS: f32 = 5.0;

/// Execute the run command
pub fn execute(args: &RunArgs, json: bool, show_events: bool) -> Result<()> {
    let scenario: Scenario = args.scenario.parse().map_err(CliError::from)?;
    validate_args(args)?;
    let seconds = args
        .seconds
        .unwrap_or_else(|| scenario.duration() + RUN_OUT_SECS);

    let mut config = load_config(args.config.as_deref()).map_err(CliError::from)?;
    if let Some(kmh) = args.speed_limit {
        config.speed_limit.limit_kmh = kmh;
    }

    let mut cluster = Cluster::new(config).map_err(CliError::from)?;
    let recorder = show_events.then(|| EventRecorder::attach(cluster.bus()));

    cluster.set_selector(args.selector);
    if let Some(mode) = &args.mode {
        cluster.select_mode(mode).map_err(CliError::from)?;
    }
    if let Some(signal) = args.turn_signal {
        cluster.turn_signals().set(signal.into());
    }
    if let Some(level) = args.ambient_light {
        cluster.themes().set_auto(true);
        cluster.set_ambient_light(level);
    }

    info!(scenario = %scenario, seconds, dt = args.dt, "starting run");
    output::print_run_header(scenario, seconds, &cluster, json);
    if let Some(recorder) = &recorder {
        output::print_events(0, &recorder.take(), json)?;
    }

    let every = u64::from(args.every);
    let dt = f64::from(args.dt);
    let steps = tick_count(f64::from(seconds), dt);
    let mut ticks: u64 = 0;
    for step in 0..steps {
        let t = scenario_time(f64::from(step) * dt);
        let frame = cluster.tick(&scenario.inputs_at(t), args.dt);
        ticks = frame.tick;

        if let Some(recorder) = &recorder {
            output::print_events(ticks, &recorder.take(), json)?;
        }
        if ticks.checked_rem(every) == Some(0) {
            output::print_snapshot(&cluster.snapshot(cluster.elapsed()), json)?;
        }
    }
    if ticks == 0 || ticks.checked_rem(every) != Some(0) {
        output::print_snapshot(&cluster.snapshot(cluster.elapsed()), json)?;
    }

    debug!(ticks, elapsed_s = cluster.elapsed(), "run finished");
    Ok(())
}

/// Whole ticks of `dt` needed to cover `seconds`. A trailing sliver
/// shorter than a thousandth of a tick is not run.
fn tick_count(seconds: f64, dt: f64) -> u32 {
    let steps = (seconds / dt - 1e-3).ceil().max(0.0);
    if steps >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        to_u32(steps)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "caller clamps into [0, u32::MAX)"
)]
fn to_u32(value: f64) -> u32 {
    value as u32
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "scenario scripts are keyed in f32 seconds"
)]
fn scenario_time(t: f64) -> f32 {
    t as f32
}

fn validate_args(args: &RunArgs) -> Result<(), CliError> {
    if !args.dt.is_finite() || args.dt < MIN_DT {
        return Err(CliError::InvalidArgument(format!(
            "--dt must be at least {MIN_DT} seconds, got {}",
            args.dt
        )));
    }
    if args.every == 0 {
        return Err(CliError::InvalidArgument(
            "--every must be at least 1".to_string(),
        ));
    }
    if let Some(level) = args.ambient_light
        && !(0.0..=1.0).contains(&level)
    {
        return Err(CliError::InvalidArgument(format!(
            "--ambient-light must be within [0, 1], got {level}"
        )));
    }
    if let Some(seconds) = args.seconds
        && (!seconds.is_finite() || seconds < 0.0)
    {
        return Err(CliError::InvalidArgument(format!(
            "--seconds must be a finite, non-negative number, got {seconds}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencluster::contracts::GearSelector;

    fn args() -> RunArgs {
        RunArgs {
            scenario: "launch".to_string(),
            seconds: None,
            dt: 0.05,
            every: 10,
            selector: GearSelector::Drive,
            mode: None,
            speed_limit: None,
            turn_signal: None,
            ambient_light: None,
            config: None,
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(matches!(validate_args(&args()), Ok(())));
    }

    #[test]
    fn test_rejects_non_positive_dt() {
        for dt in [0.0, -0.1, f32::NAN] {
            let mut bad = args();
            bad.dt = dt;
            assert!(matches!(
                validate_args(&bad),
                Err(CliError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_rejects_dt_below_simulator_floor() {
        let mut bad = args();
        bad.dt = MIN_DT / 10.0;
        assert!(matches!(
            validate_args(&bad),
            Err(CliError::InvalidArgument(msg)) if msg.contains("--dt")
        ));

        let mut floor = args();
        floor.dt = MIN_DT;
        assert!(matches!(validate_args(&floor), Ok(())));
    }

    #[test]
    fn test_tick_count_covers_duration_exactly() {
        assert_eq!(tick_count(0.0, 0.05), 0);
        assert_eq!(tick_count(1.0, 0.05), 20);
        assert_eq!(tick_count(0.5, 0.001), 500);
        assert_eq!(tick_count(0.01, 0.0001), 100);
        assert_eq!(tick_count(1.02, 0.05), 21);
    }

    #[test]
    fn test_tick_count_saturates() {
        assert_eq!(tick_count(1.0e9, 0.0001), u32::MAX);
    }

    #[test]
    fn test_rejects_zero_every() {
        let mut bad = args();
        bad.every = 0;
        assert!(matches!(
            validate_args(&bad),
            Err(CliError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_rejects_ambient_light_out_of_range() {
        for level in [-0.5, 1.5, f32::NAN] {
            let mut bad = args();
            bad.ambient_light = Some(level);
            assert!(matches!(
                validate_args(&bad),
                Err(CliError::InvalidArgument(_))
            ));
        }
    }

    #[test]
    fn test_rejects_negative_seconds() {
        let mut bad = args();
        bad.seconds = Some(-1.0);
        assert!(matches!(
            validate_args(&bad),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
