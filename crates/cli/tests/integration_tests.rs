//! Integration tests for clusterctl
//!
//! Each test runs the built binary and checks its output and exit status.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Custom predicate to check if output is valid JSON
fn is_json() -> impl predicates::Predicate<[u8]> {
    predicates::function::function(|s: &[u8]| {
        std::str::from_utf8(s)
            .ok()
            .is_some_and(|text| serde_json::from_str::<Value>(text).is_ok())
    })
}

/// Test helper to create a clusterctl command
fn clusterctl() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("clusterctl")?;
    cmd.env_remove("RUST_LOG");
    Ok(cmd)
}

/// Parse stdout as JSON lines
fn json_lines(stdout: &[u8]) -> Result<Vec<Value>, Box<dyn std::error::Error>> {
    let text = std::str::from_utf8(stdout)?;
    let mut values = Vec::new();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        values.push(serde_json::from_str(line)?);
    }
    Ok(values)
}

fn write_config(dir: &TempDir, name: &str, content: &str) -> std::io::Result<std::path::PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, content)?;
    Ok(path)
}

#[test]
fn test_help_lists_commands() -> TestResult {
    clusterctl()?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("modes"));
    Ok(())
}

#[test]
fn test_version() -> TestResult {
    clusterctl()?
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("clusterctl"));
    Ok(())
}

#[test]
fn test_completion_bash() -> TestResult {
    clusterctl()?
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("clusterctl"));
    Ok(())
}

mod run_tests {
    use super::*;

    #[test]
    fn test_run_launch_json_lines() -> TestResult {
        let output = clusterctl()?
            .args(["run", "--scenario", "launch", "--seconds", "20", "--json"])
            .output()?;
        assert!(output.status.success());

        let lines = json_lines(&output.stdout)?;
        assert!(lines.len() >= 40);
        assert!(lines.iter().all(|line| line["kind"] == "snapshot"));

        let last = lines.last().ok_or("no snapshots")?;
        let snapshot = &last["snapshot"];
        assert_eq!(snapshot["selector"], "Drive");
        assert_eq!(snapshot["mode"], "Road");
        assert!(snapshot["gear"].as_u64().is_some_and(|g| g >= 5));
        assert_eq!(
            snapshot["alerts"].as_array().map(Vec::len),
            Some(4),
            "every alert kind is reported"
        );
        Ok(())
    }

    #[test]
    fn test_run_human_output() -> TestResult {
        clusterctl()?
            .args(["run", "--scenario", "cruise", "--seconds", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Scenario:"))
            .stdout(predicate::str::contains("km/h"));
        Ok(())
    }

    #[test]
    fn test_run_with_mode_override() -> TestResult {
        let output = clusterctl()?
            .args(["run", "--seconds", "1", "--mode", "snow", "--json"])
            .output()?;
        assert!(output.status.success());
        let lines = json_lines(&output.stdout)?;
        let last = lines.last().ok_or("no snapshots")?;
        assert_eq!(last["snapshot"]["mode"], "Snow");
        Ok(())
    }

    #[test]
    fn test_run_verbose_prints_events() -> TestResult {
        let output = clusterctl()?
            .args(["run", "--seconds", "1", "--json", "-v"])
            .output()?;
        assert!(output.status.success());
        let lines = json_lines(&output.stdout)?;
        assert!(lines.iter().any(|line| {
            line["kind"] == "event" && line["event"]["type"] == "gear_selector"
        }));
        assert!(
            lines
                .iter()
                .any(|line| line["kind"] == "event" && line["event"]["type"] == "speed")
        );
        Ok(())
    }

    #[test]
    fn test_dim_ambient_light_selects_night_theme() -> TestResult {
        let output = clusterctl()?
            .args(["run", "--seconds", "0.5", "--ambient-light", "0.1", "--json", "-v"])
            .output()?;
        assert!(output.status.success());
        let lines = json_lines(&output.stdout)?;
        assert!(lines.iter().any(|line| {
            line["kind"] == "event"
                && line["event"]["type"] == "theme"
                && line["event"]["theme"]["name"] == "Night"
        }));
        let last = lines.last().ok_or("no snapshots")?;
        assert_eq!(last["snapshot"]["theme"], "Night");
        Ok(())
    }

    #[test]
    fn test_unknown_scenario_exits_3() -> TestResult {
        clusterctl()?
            .args(["run", "--scenario", "drift"])
            .assert()
            .code(3)
            .stderr(predicate::str::contains("drift"));
        Ok(())
    }

    #[test]
    fn test_unknown_mode_exits_3() -> TestResult {
        clusterctl()?
            .args(["run", "--mode", "sand", "--json"])
            .assert()
            .code(3)
            .stdout(is_json())
            .stdout(predicate::str::contains("\"success\":false"));
        Ok(())
    }

    #[test]
    fn test_zero_dt_exits_1() -> TestResult {
        clusterctl()?
            .args(["run", "--dt", "0"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("--dt"));
        Ok(())
    }

    #[test]
    fn test_dt_below_simulator_floor_exits_1() -> TestResult {
        clusterctl()?
            .args(["run", "--seconds", "0.01", "--dt", "0.00001"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("--dt"));
        Ok(())
    }

    #[test]
    fn test_small_dt_run_ends_on_requested_duration() -> TestResult {
        let output = clusterctl()?
            .args([
                "run", "--seconds", "0.5", "--dt", "0.001", "--every", "1000", "--json",
            ])
            .output()?;
        assert!(output.status.success());

        let lines = json_lines(&output.stdout)?;
        assert_eq!(lines.len(), 1, "only the closing snapshot is printed");
        let elapsed = lines
            .last()
            .and_then(|line| line["snapshot"]["elapsed_s"].as_f64())
            .ok_or("no elapsed_s")?;
        assert!((elapsed - 0.5).abs() < 1e-3, "elapsed {elapsed}");
        Ok(())
    }

    #[test]
    fn test_run_with_invalid_config_exits_2() -> TestResult {
        let dir = TempDir::new()?;
        let path = write_config(&dir, "bad.yaml", "default_mode: Sand\n")?;
        clusterctl()?
            .arg("run")
            .arg("--config")
            .arg(&path)
            .assert()
            .code(2);
        Ok(())
    }
}

mod config_tests {
    use super::*;

    #[test]
    fn test_validate_accepts_valid_file() -> TestResult {
        let dir = TempDir::new()?;
        let path = write_config(
            &dir,
            "cluster.yaml",
            "default_mode: Trail\nspeed_limit:\n  limit_kmh: 80.0\n",
        )?;
        clusterctl()?
            .args(["config", "validate"])
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("is valid"));
        Ok(())
    }

    #[test]
    fn test_validate_rejects_unknown_default_mode() -> TestResult {
        let dir = TempDir::new()?;
        let path = write_config(&dir, "cluster.json", r#"{"default_mode": "Sand"}"#)?;
        clusterctl()?
            .args(["config", "validate"])
            .arg(&path)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Sand"));
        Ok(())
    }

    #[test]
    fn test_validate_missing_file_exits_1() -> TestResult {
        let dir = TempDir::new()?;
        clusterctl()?
            .args(["config", "validate"])
            .arg(dir.path().join("missing.yaml"))
            .assert()
            .code(1);
        Ok(())
    }

    #[test]
    fn test_dump_round_trips_through_validate() -> TestResult {
        let output = clusterctl()?.args(["config", "dump"]).output()?;
        assert!(output.status.success());
        let yaml = String::from_utf8(output.stdout)?;
        assert!(yaml.contains("default_mode"));

        let dir = TempDir::new()?;
        let path = write_config(&dir, "dumped.yml", &yaml)?;
        clusterctl()?
            .args(["config", "validate", "--json"])
            .arg(&path)
            .assert()
            .success()
            .stdout(is_json());
        Ok(())
    }

    #[test]
    fn test_dump_json() -> TestResult {
        let output = clusterctl()?
            .args(["config", "dump", "--format", "json"])
            .output()?;
        assert!(output.status.success());
        let value: Value = serde_json::from_slice(&output.stdout)?;
        assert_eq!(value["default_mode"], "Road");
        assert!(value["speed_limit"]["limit_kmh"].is_number());
        Ok(())
    }
}

mod listing_tests {
    use super::*;

    #[test]
    fn test_modes_json() -> TestResult {
        let output = clusterctl()?.args(["modes", "--json"]).output()?;
        assert!(output.status.success());
        let value: Value = serde_json::from_slice(&output.stdout)?;
        let names: Vec<&str> = value["modes"]
            .as_array()
            .ok_or("modes is not an array")?
            .iter()
            .filter_map(|m| m["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Road", "Trail", "Snow"]);
        Ok(())
    }

    #[test]
    fn test_modes_human() -> TestResult {
        clusterctl()?
            .arg("modes")
            .assert()
            .success()
            .stdout(predicate::str::contains("Trail"));
        Ok(())
    }

    #[test]
    fn test_scenarios() -> TestResult {
        clusterctl()?
            .arg("scenarios")
            .assert()
            .success()
            .stdout(predicate::str::contains("brake_test"))
            .stdout(predicate::str::contains("closing"));
        Ok(())
    }
}
