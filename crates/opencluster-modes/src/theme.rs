//! Day/night colour theme switching.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use opencluster_bus::EventBus;
use opencluster_contracts::{Rgba, Theme, ThemeChanged};
use serde::{Deserialize, Serialize};

use crate::error::{ModeError, ModeResult};

/// Name of the daylight theme.
pub const DAY: &str = "Day";
/// Name of the night theme.
pub const NIGHT: &str = "Night";

/// Stock daylight theme: white on black at full backlight.
pub fn day() -> Theme {
    Theme::new(DAY)
}

/// Stock night theme: dimmed, warmer readouts.
pub fn night() -> Theme {
    Theme::new(NIGHT)
        .with_colors(
            Rgba::opaque(0, 0, 0),
            Rgba::opaque(230, 220, 200),
            Rgba::opaque(90, 90, 100),
            Rgba::opaque(255, 120, 40),
        )
        .with_brightness(0.55)
}

/// Automatic theme switching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Follow the ambient light sensor.
    pub auto: bool,
    /// Light level in `[0, 1]` below which the night theme is used.
    pub night_below: f32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            auto: false,
            night_below: 0.4,
        }
    }
}

impl ThemeConfig {
    /// Check the threshold.
    ///
    /// # Errors
    ///
    /// Returns [`ModeError::InvalidTheme`] when `night_below` is outside
    /// `[0, 1]`.
    pub fn validate(&self) -> ModeResult<()> {
        if !(0.0..=1.0).contains(&self.night_below) {
            return Err(ModeError::InvalidTheme(format!(
                "night_below must be within [0, 1], got {}",
                self.night_below
            )));
        }
        Ok(())
    }
}

/// Holds the active colour theme and announces changes.
///
/// Starts on the day theme. Any selection that differs from the current
/// theme publishes `ThemeChanged` once; re-selecting it is a no-op.
#[derive(Debug)]
pub struct ThemeController {
    bus: Rc<EventBus>,
    night_below: f32,
    auto: Cell<bool>,
    day: Arc<Theme>,
    night: Arc<Theme>,
    current: RefCell<Arc<Theme>>,
}

impl ThemeController {
    /// Start on the stock day theme without publishing.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn new(bus: &Rc<EventBus>, config: ThemeConfig) -> ModeResult<Self> {
        Self::with_themes(bus, config, day(), night())
    }

    /// Start on `day` with custom day and night themes.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn with_themes(
        bus: &Rc<EventBus>,
        config: ThemeConfig,
        day: Theme,
        night: Theme,
    ) -> ModeResult<Self> {
        config.validate()?;
        let day = Arc::new(day);
        Ok(Self {
            bus: Rc::clone(bus),
            night_below: config.night_below,
            auto: Cell::new(config.auto),
            current: RefCell::new(Arc::clone(&day)),
            day,
            night: Arc::new(night),
        })
    }

    /// Make `theme` current. Returns `true` if it replaced a different
    /// theme.
    pub fn set_theme(&self, theme: Arc<Theme>) -> bool {
        let previous = {
            let mut current = self.current.borrow_mut();
            if Arc::ptr_eq(&current, &theme) || **current == *theme {
                return false;
            }
            std::mem::replace(&mut *current, Arc::clone(&theme))
        };
        tracing::info!(from = %previous.name, to = %theme.name, "theme changed");
        self.bus.publish(ThemeChanged { theme });
        true
    }

    /// Switch to the day theme.
    pub fn show_day(&self) -> bool {
        self.set_theme(Arc::clone(&self.day))
    }

    /// Switch to the night theme.
    pub fn show_night(&self) -> bool {
        self.set_theme(Arc::clone(&self.night))
    }

    /// Swap day for night or back. Any custom theme goes to day.
    pub fn toggle(&self) -> bool {
        if self.is_night() {
            self.show_day()
        } else {
            self.show_night()
        }
    }

    /// Feed an ambient light reading in `[0, 1]`.
    ///
    /// Ignored unless automatic switching is on. NaN readings are dropped;
    /// other values are clamped. Returns `true` if the theme changed.
    pub fn on_ambient_light(&self, level: f32) -> bool {
        if !self.auto.get() || level.is_nan() {
            return false;
        }
        if level.clamp(0.0, 1.0) < self.night_below {
            self.show_night()
        } else {
            self.show_day()
        }
    }

    /// Turn automatic switching on or off. The theme is kept until the
    /// next reading.
    pub fn set_auto(&self, auto: bool) {
        if self.auto.replace(auto) != auto {
            tracing::debug!(auto, "automatic theme switching");
        }
    }

    /// Whether ambient readings drive the theme.
    pub fn is_auto(&self) -> bool {
        self.auto.get()
    }

    /// Whether the night theme is showing.
    pub fn is_night(&self) -> bool {
        let current = self.current.borrow();
        Arc::ptr_eq(&current, &self.night) || **current == *self.night
    }

    /// Active theme.
    pub fn current(&self) -> Arc<Theme> {
        Arc::clone(&self.current.borrow())
    }

    /// Light level below which night is chosen.
    pub fn night_below(&self) -> f32 {
        self.night_below
    }
}
