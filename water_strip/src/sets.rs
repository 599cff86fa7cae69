use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum WaterStripSet {
    /// Forwards `SplashEvent`s into the strip's pending queue.
    QueueSplashes,
    /// Advances the strip by one fixed tick.
    Simulate,
}
