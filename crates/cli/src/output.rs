//! Output formatting for CLI responses

use std::path::Path;

use anyhow::Error;
use colored::*;
use opencluster::alerts::{FcwZone, RollBand};
use opencluster::contracts::ClusterEvent;
use opencluster::modes::ModeCatalog;
use opencluster::{Cluster, ClusterConfig, ClusterSnapshot, Scenario};
use serde_json::json;

use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "exit_code": crate::error::exit_code(error),
        }
    });
    match serde_json::to_string(&error_json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print the run banner; JSON output has none.
pub fn print_run_header(scenario: Scenario, seconds: f32, cluster: &Cluster, json: bool) {
    if json {
        return;
    }
    println!(
        "{} {} ({}) for {:.1} s in {} mode, {} theme, limit {:.0} km/h",
        "Scenario:".bold(),
        scenario.to_string().cyan(),
        scenario.description(),
        seconds,
        cluster.modes().current().name,
        cluster.themes().current().name,
        cluster.speed_limit().limit()
    );
}

/// Print one snapshot, as a single JSON line or a human status line
pub fn print_snapshot(snapshot: &ClusterSnapshot, json: bool) -> Result<(), CliError> {
    if json {
        let line = json!({ "kind": "snapshot", "snapshot": snapshot });
        println!("{}", serde_json::to_string(&line)?);
        return Ok(());
    }

    let Some(frame) = snapshot.frame else {
        println!("{:>7.2}s  {}", snapshot.elapsed_s, "no telemetry yet".dimmed());
        return Ok(());
    };

    let gear = snapshot
        .gear
        .map_or_else(|| snapshot.selector.to_string(), |g| format!("D{g}"));
    let alerts: Vec<ColoredString> = snapshot
        .alerts
        .iter()
        .filter(|a| a.active)
        .map(|a| a.alert.as_str().red().bold())
        .collect();
    let alerts = if alerts.is_empty() {
        "-".dimmed().to_string()
    } else {
        alerts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    };
    let ttc = snapshot
        .ttc_display_s
        .map_or_else(|| "--".to_string(), |s| format!("{s:.1}s"));
    let lamps = match (snapshot.lamps.left, snapshot.lamps.right) {
        (true, true) => "<>",
        (true, false) => "< ",
        (false, true) => " >",
        (false, false) => "  ",
    };

    println!(
        "{:>7.2}s  {:>5.1} km/h  {:>4.0} rpm  {:<3}  ttc {}  roll {}  {}  [{}]  {}",
        snapshot.elapsed_s,
        frame.speed_kmh,
        frame.rpm,
        gear,
        color_zone(snapshot.fcw_zone, &ttc),
        color_roll(snapshot.roll_band, snapshot.roll_display_deg),
        lamps.yellow(),
        snapshot.mode,
        alerts
    );
    Ok(())
}

fn color_zone(zone: FcwZone, text: &str) -> ColoredString {
    match zone {
        FcwZone::Clear => text.green(),
        FcwZone::Caution => text.yellow(),
        FcwZone::Critical => text.red().bold(),
    }
}

fn color_roll(band: RollBand, roll_deg: f32) -> ColoredString {
    let text = format!("{roll_deg:+5.1}°");
    match band {
        RollBand::Level => text.normal(),
        RollBand::Caution => text.yellow(),
        RollBand::Critical => text.red(),
    }
}

/// Print events recorded during tick `tick`
pub fn print_events(tick: u64, events: &[ClusterEvent], json: bool) -> Result<(), CliError> {
    for event in events {
        if json {
            let line = json!({ "kind": "event", "tick": tick, "event": event });
            println!("{}", serde_json::to_string(&line)?);
        } else {
            println!("  {} #{:<5} {}", "event".dimmed(), tick, describe_event(event));
        }
    }
    Ok(())
}

fn describe_event(event: &ClusterEvent) -> String {
    match event {
        ClusterEvent::Speed(e) => format!("speed {:.2} km/h", e.kmh),
        ClusterEvent::Rpm(e) => format!("rpm {:.0}", e.rpm),
        ClusterEvent::Roll(e) => format!("roll {:.2}°", e.deg),
        ClusterEvent::G(e) => format!("g lat {:.3} lon {:.3}", e.lateral, e.longitudinal),
        ClusterEvent::Ttc(e) => format!("ttc {:.2} s", e.seconds),
        ClusterEvent::GearSelector(e) => format!("selector {}", e.selector),
        ClusterEvent::DriveGear(e) => format!("drive gear {}", e.gear).bold().to_string(),
        ClusterEvent::Mode(e) => format!("mode {}", e.mode.name).cyan().to_string(),
        ClusterEvent::Theme(e) => format!(
            "theme {} (brightness {:.0}%)",
            e.theme.name,
            e.theme.brightness * 100.0
        ),
        ClusterEvent::Alert(e) => {
            let state = if e.active { "on".red() } else { "off".green() };
            format!("alert {} {}", e.alert, state)
        }
        ClusterEvent::TurnSignal(e) => format!("turn signal {}", e.state),
    }
}

/// Print the stock terrain modes
pub fn print_modes(catalog: &ModeCatalog, json: bool) -> anyhow::Result<()> {
    if json {
        let modes: Vec<_> = catalog
            .iter()
            .map(|mode| {
                json!({
                    "name": mode.name,
                    "accent": mode.accent.to_hex(),
                    "icon": mode.icon.as_str(),
                    "panel_order": mode.panel_order(),
                })
            })
            .collect();
        let output = json!({ "success": true, "modes": modes });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for mode in catalog.iter() {
        let order: Vec<String> = mode
            .panel_order()
            .iter()
            .map(|panel| format!("{panel} ({:?})", mode.variant_for(*panel)))
            .collect();
        println!(
            "{} {}  {}",
            mode.name.bold(),
            mode.accent.to_hex().dimmed(),
            mode.icon.as_str().dimmed()
        );
        println!("  {}", order.join(" > "));
    }
    Ok(())
}

/// Print the stock scenarios
pub fn print_scenarios(scenarios: &[Scenario], json: bool) -> anyhow::Result<()> {
    if json {
        let rows: Vec<_> = scenarios
            .iter()
            .map(|s| {
                json!({
                    "name": s.name(),
                    "description": s.description(),
                    "duration_s": s.duration(),
                })
            })
            .collect();
        let output = json!({ "success": true, "scenarios": rows });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for scenario in scenarios {
        println!(
            "{:<12} {:>5.1} s  {}",
            scenario.name().bold(),
            scenario.duration(),
            scenario.description()
        );
    }
    Ok(())
}

/// Report a config file that passed validation
pub fn print_config_valid(path: &Path, config: &ClusterConfig, json: bool) {
    if json {
        let output = json!({
            "success": true,
            "path": path.display().to_string(),
            "default_mode": config.default_mode,
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Failed to format validation result as JSON: {}", e),
        }
    } else {
        println!("{} {} is valid", "✓".green(), path.display());
    }
}
