//! Stock terrain modes.
//!
//! All three start from the same base ranking (speed 100, rpm 90,
//! inclinometer 80, G meter 70, FCW 60) and adjust it for the surface.

use opencluster_contracts::{GaugeVariant, PanelId, Rgba, TerrainMode};

/// Name of the on-road mode.
pub const ROAD: &str = "Road";
/// Name of the off-road mode.
pub const TRAIL: &str = "Trail";
/// Name of the low-grip mode.
pub const SNOW: &str = "Snow";

fn base(name: &str) -> TerrainMode {
    TerrainMode::new(name)
        .with_priority(PanelId::Speed, 100)
        .with_priority(PanelId::Rpm, 90)
        .with_priority(PanelId::Inclinometer, 80)
        .with_priority(PanelId::GMeter, 70)
        .with_priority(PanelId::Fcw, 60)
}

/// Paved roads: speed first, both gauges as dials.
pub fn road() -> TerrainMode {
    base(ROAD)
        .with_variant(PanelId::Speed, GaugeVariant::Dial)
        .with_variant(PanelId::Rpm, GaugeVariant::Dial)
        .with_accent(Rgba::opaque(0, 255, 255))
        .with_icon("mode/road")
}

/// Loose surfaces: the inclinometer moves to the top, speed shrinks to a
/// bar.
pub fn trail() -> TerrainMode {
    base(TRAIL)
        .with_priority(PanelId::Inclinometer, 110)
        .with_priority(PanelId::Fcw, 50)
        .with_variant(PanelId::Speed, GaugeVariant::Bar)
        .with_variant(PanelId::Rpm, GaugeVariant::Dial)
        .with_accent(Rgba::opaque(255, 153, 0))
        .with_icon("mode/trail")
}

/// Low grip: G meter and collision warning climb, rpm becomes a bar.
pub fn snow() -> TerrainMode {
    base(SNOW)
        .with_priority(PanelId::GMeter, 95)
        .with_priority(PanelId::Fcw, 85)
        .with_priority(PanelId::Rpm, 65)
        .with_variant(PanelId::Speed, GaugeVariant::Dial)
        .with_variant(PanelId::Rpm, GaugeVariant::Bar)
        .with_accent(Rgba::opaque(153, 204, 255))
        .with_icon("mode/snow")
}

/// Every stock mode, in selector order.
pub fn all() -> [TerrainMode; 3] {
    [road(), trail(), snow()]
}
