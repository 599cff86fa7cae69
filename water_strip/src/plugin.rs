//! Bevy plugin driving a [`WaterStrip`] from the fixed timestep.

use bevy::prelude::*;
use bevy_log::debug;

use crate::config::WaterStripConfig;
use crate::error::Result;
use crate::sets::WaterStripSet;
use crate::simulation::{Splash, WaterStrip};

/// A body crossing the water surface this frame.
///
/// Gameplay code sends these; they are queued on the strip and applied at
/// the start of the next fixed tick.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SplashEvent {
    pub x_position: f32,
    pub radius: f32,
    pub speed: f32,
}

impl From<Splash> for SplashEvent {
    fn from(splash: Splash) -> Self {
        Self {
            x_position: splash.x_position,
            radius: splash.radius,
            speed: splash.speed,
        }
    }
}

/// Runtime switches for the water simulation.
#[derive(Resource, Clone, Debug, Reflect)]
#[reflect(Resource)]
pub struct WaterSurfaceSettings {
    /// Whether the strip is advanced at all.
    pub enabled: bool,

    /// Log every splash forwarded to the strip.
    pub splash_logging: bool,
}

impl Default for WaterSurfaceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            splash_logging: false,
        }
    }
}

/// Plugin that adds a water strip to the app.
///
/// This plugin:
/// - Inserts the [`WaterStrip`] resource built from the config
/// - Registers [`SplashEvent`]
/// - Queues splashes and advances the strip once per `FixedUpdate`
pub struct WaterStripPlugin {
    strip: WaterStrip,
}

impl WaterStripPlugin {
    /// Validates the config up front so a bad width fails before the app runs.
    pub fn new(config: &WaterStripConfig) -> Result<Self> {
        Ok(Self {
            strip: WaterStrip::new(config)?,
        })
    }
}

impl Plugin for WaterStripPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.strip.clone())
            .init_resource::<WaterSurfaceSettings>()
            .register_type::<WaterSurfaceSettings>()
            .add_event::<SplashEvent>()
            .configure_sets(
                FixedUpdate,
                (WaterStripSet::QueueSplashes, WaterStripSet::Simulate)
                    .chain()
                    .run_if(simulation_enabled),
            )
            .add_systems(
                FixedUpdate,
                (
                    queue_splashes.in_set(WaterStripSet::QueueSplashes),
                    advance_water_strip.in_set(WaterStripSet::Simulate),
                ),
            );
    }
}

fn simulation_enabled(settings: Res<WaterSurfaceSettings>) -> bool {
    settings.enabled
}

/// Moves this frame's splash events into the strip's queue.
pub fn queue_splashes(
    mut events: EventReader<SplashEvent>,
    mut strip: ResMut<WaterStrip>,
    settings: Res<WaterSurfaceSettings>,
) {
    for event in events.read() {
        if settings.splash_logging {
            debug!(
                "Splash at x={} radius={} speed={}",
                event.x_position, event.radius, event.speed
            );
        }
        strip.splash(event.x_position, event.radius, event.speed);
    }
}

/// Steps the strip forward.
///
/// Runs in FixedUpdate so the simulation sees one logical tick per call
/// regardless of frame rate.
pub fn advance_water_strip(mut strip: ResMut<WaterStrip>) {
    strip.advance();
}
