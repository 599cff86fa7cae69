//! Spring-column water surface for 2D games.
//!
//! A [`WaterStrip`] is a row of columns that oscillate around rest height,
//! pass disturbances to their neighbours and react to splashes from bodies
//! crossing the surface. Hosts either drive it directly (`splash`, `advance`,
//! `height_at`) or through [`WaterStripPlugin`] in a Bevy app.

pub mod config;
pub mod constants;
pub mod error;
pub mod plugin;
pub mod sets;
pub mod simulation;

pub use config::{load_config, DisplaySettings, SpringParams, SurfacePreset, WaterStripConfig};
pub use constants::*;
pub use error::{Result, WaterStripError};
pub use plugin::{SplashEvent, WaterStripPlugin, WaterSurfaceSettings};
pub use sets::WaterStripSet;
pub use simulation::{Column, ColumnGrid, DriverState, Splash, WaterStrip};
