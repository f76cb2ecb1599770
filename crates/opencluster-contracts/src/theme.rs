//! Dashboard colour theme descriptor.

use serde::{Deserialize, Serialize};

use crate::Rgba;

/// Colours and backlight level the renderer paints the cluster with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    /// Display name, e.g. `Day`.
    pub name: String,
    /// Background fill.
    pub background: Rgba,
    /// Needles and primary readouts.
    pub primary: Rgba,
    /// Scales and secondary labels.
    pub secondary: Rgba,
    /// Highlights.
    pub accent: Rgba,
    /// Backlight level in `[0, 1]`.
    pub brightness: f32,
}

impl Theme {
    /// White-on-black theme at full brightness.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Rgba::opaque(0, 0, 0),
            primary: Rgba::opaque(255, 255, 255),
            secondary: Rgba::opaque(128, 128, 128),
            accent: Rgba::opaque(51, 153, 255),
            brightness: 1.0,
        }
    }

    /// Replace the four colours.
    #[must_use]
    pub fn with_colors(
        mut self,
        background: Rgba,
        primary: Rgba,
        secondary: Rgba,
        accent: Rgba,
    ) -> Self {
        self.background = background;
        self.primary = primary;
        self.secondary = secondary;
        self.accent = accent;
        self
    }

    /// Set the backlight level, clamped into `[0, 1]`. NaN keeps the
    /// current level.
    #[must_use]
    pub fn with_brightness(mut self, brightness: f32) -> Self {
        if !brightness.is_nan() {
            self.brightness = brightness.clamp(0.0, 1.0);
        }
        self
    }
}
