//! Snapshot tests for alert configuration errors and serialized settings.

use insta::assert_snapshot;
use opencluster_alerts::{
    AlertResult, BlinkTiming, FcwConfig, HysteresisBand, PulseConfig, RpmAlertConfig,
    SpeedLimitConfig,
};

fn message(result: AlertResult<()>) -> String {
    result.err().map(|e| e.to_string()).unwrap_or_default()
}

#[test]
fn test_band_errors() {
    assert_snapshot!(
        message(HysteresisBand::rising(f32::NAN, 1.0).validate()),
        @"Invalid hysteresis band: threshold must be finite"
    );
    assert_snapshot!(
        message(SpeedLimitConfig { limit_kmh: 250.0, ..SpeedLimitConfig::default() }.validate()),
        @"Invalid hysteresis band: speed limit must be within 0..=200 km/h"
    );
    assert_snapshot!(
        message(RpmAlertConfig { threshold_rpm: 0.0, ..RpmAlertConfig::default() }.validate()),
        @"Invalid hysteresis band: rpm threshold must be finite and greater than 0"
    );
    assert_snapshot!(
        message(FcwConfig { critical_ttc_s: 2.0, ..FcwConfig::default() }.validate()),
        @"Invalid hysteresis band: critical_ttc_s must be below warning_ttc_s"
    );
}

#[test]
fn test_pulse_and_timing_errors() {
    let inverted = PulseConfig {
        min: 1.0,
        max: 0.5,
        ..PulseConfig::ALERT_FLASH
    };
    assert_snapshot!(
        message(inverted.validate()),
        @"Invalid pulse: min must not exceed max"
    );
    let timing = BlinkTiming {
        on_s: 0.25,
        off_s: -1.0,
    };
    assert_snapshot!(
        message(timing.validate()),
        @"Invalid blink timing: off_s must be finite and not negative"
    );
}

#[test]
fn test_rpm_config_json() -> Result<(), serde_json::Error> {
    let json = serde_json::to_string(&RpmAlertConfig::default())?;
    assert_snapshot!(
        json,
        @r#"{"threshold_rpm":4500.0,"margin_rpm":200.0,"flash":{"frequency_hz":1.0,"min":0.65,"max":1.0}}"#
    );
    Ok(())
}
