//! Config file loading.

use std::fs;

use insta::assert_snapshot;
use opencluster::{Cluster, ClusterConfig, ClusterError};
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn message(result: Result<ClusterConfig, ClusterError>) -> String {
    result.err().map(|e| e.to_string()).unwrap_or_default()
}

#[test]
fn test_load_yaml_and_json() -> TestResult {
    let dir = TempDir::new()?;
    let yaml = dir.path().join("cluster.yaml");
    fs::write(&yaml, "speed_limit:\n  limit_kmh: 70.0\ndefault_mode: Trail\n")?;
    let from_yaml = ClusterConfig::load(&yaml)?;
    assert!((from_yaml.speed_limit.limit_kmh - 70.0).abs() < f32::EPSILON);

    let json = dir.path().join("cluster.json");
    fs::write(&json, from_yaml.to_json()?)?;
    let from_json = ClusterConfig::load(&json)?;
    assert_eq!(from_json, from_yaml);

    let cluster = Cluster::new(from_json)?;
    assert_eq!(cluster.modes().current().name, "Trail");
    assert!((cluster.speed_limit().limit() - 70.0).abs() < f32::EPSILON);
    Ok(())
}

#[test]
fn test_dumped_defaults_load_back() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("defaults.yml");
    fs::write(&path, ClusterConfig::default().to_yaml()?)?;
    assert_eq!(ClusterConfig::load(&path)?, ClusterConfig::default());
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() -> TestResult {
    let dir = TempDir::new()?;
    let result = ClusterConfig::load(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(ClusterError::Io { .. })));
    Ok(())
}

#[test]
fn test_invalid_values_are_rejected() -> TestResult {
    let dir = TempDir::new()?;
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "rpm_alert:\n  threshold_rpm: -5.0\n")?;
    let err = ClusterConfig::load(&path).err();
    assert!(err.as_ref().is_some_and(ClusterError::is_invalid_config));
    Ok(())
}

#[test]
fn test_error_messages() {
    assert_snapshot!(
        message(ClusterConfig::from_yaml_str("default_mode: Sand\n")),
        @"Invalid configuration: default_mode `Sand` is not one of Road, Trail, Snow"
    );
    assert_snapshot!(
        message(ClusterConfig::from_yaml_str("gears:\n  upshift_kmh: [30, 20, 85, 115, 145, 170, 185]\n")),
        @"Invalid shift schedule: upshift[1] must be greater than upshift[0]"
    );
    assert_snapshot!(
        message(ClusterConfig::from_json_str(r#"{"vehicle": {"max_speed_kmh": -1.0}}"#)),
        @"Invalid vehicle parameter `max_speed_kmh`: must not be negative"
    );
    assert_snapshot!(
        message(ClusterConfig::load("cluster.toml")),
        @"Unsupported config format: cluster.toml"
    );
}
