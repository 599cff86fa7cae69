//! Water strip configuration.
//!
//! `WaterStripConfig` is what a host builds (or loads from a RON file) before
//! creating a [`WaterStrip`](crate::simulation::WaterStrip). Only `width`,
//! `column_spacing` and [`SpringParams`] reach the simulation;
//! [`DisplaySettings`] is carried for whatever draws the strip.

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Result, WaterStripError};

/// Spring and spread coefficients driving the simulation.
///
/// Every constructor and setter keeps the values inside their valid ranges:
/// finite values are clamped, NaN is rejected and the previous value kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringParams {
    /// Restoring force toward rest height, in `[0, 1]`.
    /// Higher values make the surface stiffer and faster to snap back.
    pub tension: f32,
    /// Fraction of velocity removed each step, in `[0, 1]`.
    pub dampening: f32,
    /// Fraction of height difference passed to a neighbour per sweep,
    /// in `[0, 0.5]`. Larger values make waves travel faster.
    pub spread: f32,
}

impl SpringParams {
    pub fn new(tension: f32, dampening: f32, spread: f32) -> Self {
        let mut params = Self::default();
        params.set_tension(tension);
        params.set_dampening(dampening);
        params.set_spread(spread);
        params
    }

    /// Sets tension, returning the value actually stored.
    pub fn set_tension(&mut self, tension: f32) -> f32 {
        self.tension = sanitize("tension", tension, self.tension, MAX_TENSION);
        self.tension
    }

    /// Sets dampening, returning the value actually stored.
    pub fn set_dampening(&mut self, dampening: f32) -> f32 {
        self.dampening = sanitize("dampening", dampening, self.dampening, MAX_DAMPENING);
        self.dampening
    }

    /// Sets spread, returning the value actually stored.
    pub fn set_spread(&mut self, spread: f32) -> f32 {
        self.spread = sanitize("spread", spread, self.spread, MAX_SPREAD);
        self.spread
    }

    /// Returns a copy with every coefficient pulled into range.
    /// Used on values that bypassed the setters (deserialized files).
    pub fn sanitized(self) -> Self {
        let mut params = Self::default();
        params.set_tension(self.tension);
        params.set_dampening(self.dampening);
        params.set_spread(self.spread);
        params
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            tension: DEFAULT_TENSION,
            dampening: DEFAULT_DAMPENING,
            spread: DEFAULT_SPREAD,
        }
    }
}

fn sanitize(name: &str, value: f32, current: f32, max: f32) -> f32 {
    if value.is_nan() {
        warn!("Rejected NaN {name}, keeping {current}");
        return current;
    }

    let clamped = value.clamp(0.0, max);
    if clamped != value {
        warn!("{name} {value} is outside [0, {max}], clamped to {clamped}");
    }
    clamped
}

/// Presentation-only options. The simulation never reads these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Vertical extent of the water body on screen
    pub height: f32,
    /// Fill color (linear RGBA)
    pub color: [f32; 4],
    /// Sprite used for droplet particles, if any
    pub drops_sprite: Option<String>,
    /// Smooth gradient between columns instead of flat steps
    pub interpolated: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            height: DEFAULT_DISPLAY_HEIGHT,
            color: DEFAULT_WATER_COLOR,
            drops_sprite: None,
            interpolated: false,
        }
    }
}

/// Everything needed to create a water strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterStripConfig {
    /// Number of columns
    pub width: usize,
    /// Horizontal distance between neighbouring columns
    pub column_spacing: f32,
    pub params: SpringParams,
    pub display: DisplaySettings,
}

impl WaterStripConfig {
    /// Config with default coefficients and display settings.
    pub fn with_width(width: usize) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn with_preset(mut self, preset: SurfacePreset) -> Self {
        self.params = preset.params();
        self
    }

    pub fn with_params(mut self, params: SpringParams) -> Self {
        self.params = params.sanitized();
        self
    }

    pub fn with_display(mut self, display: DisplaySettings) -> Self {
        self.display = display;
        self
    }

    /// Checks the geometry. Coefficients are never invalid, only clamped.
    pub fn validate(&self) -> Result<()> {
        if self.width < 1 {
            return Err(WaterStripError::InvalidWidth { width: self.width });
        }
        if !self.column_spacing.is_finite() || self.column_spacing <= 0.0 {
            return Err(WaterStripError::InvalidColumnSpacing {
                spacing: self.column_spacing,
            });
        }
        Ok(())
    }

    /// Parses a config from RON text. `origin` is only used in error messages.
    pub fn from_ron_str(contents: &str, origin: &Path) -> Result<Self> {
        let mut config: WaterStripConfig =
            ron::de::from_str(contents).map_err(|err| WaterStripError::ConfigParse {
                path: origin.to_path_buf(),
                message: err.to_string(),
            })?;

        config.params = config.params.sanitized();
        config.validate()?;
        Ok(config)
    }
}

impl Default for WaterStripConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            column_spacing: DEFAULT_COLUMN_SPACING,
            params: SpringParams::default(),
            display: DisplaySettings::default(),
        }
    }
}

/// Loads a config from a RON file.
///
/// A missing file is not an error: the default config is returned instead.
pub fn load_config(path: &Path) -> Result<WaterStripConfig> {
    if !path.exists() {
        info!(
            "Water strip config not found: {}. Using defaults.",
            path.display()
        );
        return Ok(WaterStripConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(|source| WaterStripError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;
    let config = WaterStripConfig::from_ron_str(&contents, path)?;

    info!("Loaded water strip config from {}", path.display());

    Ok(config)
}

/// Ready-made coefficient sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SurfacePreset {
    /// Heavily damped, disturbances die out almost at once
    Still,
    /// Slow, gentle ripples
    Calm,
    /// General purpose water
    #[default]
    Pond,
    /// Long-lived waves that travel fast
    Choppy,
    /// Stiff, wobbly surface
    Jello,
}

impl SurfacePreset {
    pub fn params(self) -> SpringParams {
        match self {
            SurfacePreset::Still => SpringParams::new(0.025, 0.4, 0.1),
            SurfacePreset::Calm => SpringParams::new(0.015, 0.05, 0.2),
            SurfacePreset::Pond => SpringParams::default(),
            SurfacePreset::Choppy => SpringParams::new(0.03, 0.01, 0.4),
            SurfacePreset::Jello => SpringParams::new(0.3, 0.02, 0.1),
        }
    }
}
