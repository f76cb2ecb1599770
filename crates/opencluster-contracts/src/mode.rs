//! Terrain mode descriptor shared by the coordinator and the display layer.

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{ContractError, ContractResult};

/// Dashboard panels that a terrain mode can rank and restyle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PanelId {
    /// Speedometer.
    Speed,
    /// Tachometer.
    Rpm,
    /// Roll gauge.
    Inclinometer,
    /// Lateral/longitudinal G meter.
    GMeter,
    /// Forward collision warning panel.
    Fcw,
}

impl PanelId {
    /// Every panel in declaration order.
    pub const ALL: [PanelId; 5] = [
        PanelId::Speed,
        PanelId::Rpm,
        PanelId::Inclinometer,
        PanelId::GMeter,
        PanelId::Fcw,
    ];

    /// Stable snake_case key used in config files and CLI output.
    pub const fn as_str(self) -> &'static str {
        match self {
            PanelId::Speed => "speed",
            PanelId::Rpm => "rpm",
            PanelId::Inclinometer => "inclinometer",
            PanelId::GMeter => "g_meter",
            PanelId::Fcw => "fcw",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for PanelId {
    type Err = ContractError;

    fn from_str(s: &str) -> ContractResult<Self> {
        let key = s.trim().to_ascii_lowercase();
        PanelId::ALL
            .into_iter()
            .find(|panel| panel.as_str() == key)
            .ok_or_else(|| ContractError::UnknownPanel(s.to_string()))
    }
}

/// Rendering style of a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GaugeVariant {
    /// Round needle dial.
    #[default]
    Dial,
    /// Linear bar.
    Bar,
}

/// Straight RGBA colour, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba {
    /// Fully opaque colour.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: u8::MAX }
    }

    /// `#rrggbbaa` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::opaque(255, 255, 255)
    }
}

/// Opaque reference to an icon asset; the core never loads it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(pub String);

impl IconRef {
    /// Wrap an asset key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Asset key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Priority assigned to one panel. Higher values are shown first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelPriority {
    /// Panel being ranked.
    pub panel: PanelId,
    /// Rank; ties keep declaration order.
    pub priority: i32,
}

impl PanelPriority {
    /// Pair a panel with its rank.
    pub const fn new(panel: PanelId, priority: i32) -> Self {
        Self { panel, priority }
    }
}

/// Immutable terrain mode descriptor.
///
/// Modes are shared as `Arc<TerrainMode>` once published so that every
/// subscriber sees the same instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainMode {
    /// Display name, e.g. `"Road"`.
    pub name: String,
    /// Panel ranking. Panels not listed are treated as priority 0.
    #[serde(default)]
    pub panel_priorities: Vec<PanelPriority>,
    /// Gauge style overrides. Panels not listed use [`GaugeVariant::Dial`].
    #[serde(default)]
    pub gauge_variants: BTreeMap<PanelId, GaugeVariant>,
    /// Accent colour applied to gauge chrome.
    #[serde(default)]
    pub accent: Rgba,
    /// Badge icon.
    #[serde(default)]
    pub icon: IconRef,
}

impl TerrainMode {
    /// Start a mode with no priorities or overrides.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            panel_priorities: Vec::new(),
            gauge_variants: BTreeMap::new(),
            accent: Rgba::default(),
            icon: IconRef::default(),
        }
    }

    /// Set the rank of a panel, replacing an earlier entry for it.
    #[must_use]
    pub fn with_priority(mut self, panel: PanelId, priority: i32) -> Self {
        match self.panel_priorities.iter_mut().find(|p| p.panel == panel) {
            Some(existing) => existing.priority = priority,
            None => self
                .panel_priorities
                .push(PanelPriority::new(panel, priority)),
        }
        self
    }

    /// Override the gauge style of a panel.
    #[must_use]
    pub fn with_variant(mut self, panel: PanelId, variant: GaugeVariant) -> Self {
        self.gauge_variants.insert(panel, variant);
        self
    }

    /// Set the accent colour.
    #[must_use]
    pub fn with_accent(mut self, accent: Rgba) -> Self {
        self.accent = accent;
        self
    }

    /// Set the badge icon.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = IconRef::new(icon);
        self
    }

    /// Rank of `panel`, 0 when unlisted.
    pub fn priority_of(&self, panel: PanelId) -> i32 {
        self.panel_priorities
            .iter()
            .find(|p| p.panel == panel)
            .map_or(0, |p| p.priority)
    }

    /// Gauge style for `panel`.
    pub fn variant_for(&self, panel: PanelId) -> GaugeVariant {
        self.gauge_variants.get(&panel).copied().unwrap_or_default()
    }

    /// All panels sorted by descending priority.
    ///
    /// Listed panels come first in declaration order among equal ranks,
    /// followed by unlisted panels at priority 0 in [`PanelId::ALL`] order.
    pub fn panel_order(&self) -> Vec<PanelId> {
        let mut ranked: Vec<PanelPriority> = self.panel_priorities.clone();
        for panel in PanelId::ALL {
            if !ranked.iter().any(|p| p.panel == panel) {
                ranked.push(PanelPriority::new(panel, 0));
            }
        }
        // sort_by is stable
        ranked.sort_by(|a, b| b.priority.cmp(&a.priority));
        ranked.into_iter().map(|p| p.panel).collect()
    }

    /// Upper-case badge text.
    pub fn badge_label(&self) -> String {
        self.name.to_uppercase()
    }
}

impl fmt::Display for TerrainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
