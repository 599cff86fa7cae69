//! Impact injection.
//!
//! A splash adds `speed * falloff` to the velocity of every column whose
//! position lies within `radius` of the impact point. The falloff is linear:
//! `1` at the impact point, `0` at the edge of the radius and beyond.

use log::trace;
use serde::{Deserialize, Serialize};

use super::grid::ColumnGrid;

/// A body hitting the water surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Splash {
    /// Horizontal impact coordinate, in the same space as column positions
    pub x_position: f32,
    /// Impact radius
    pub radius: f32,
    /// Vertical velocity of the body (negative = moving down)
    pub speed: f32,
}

impl Splash {
    pub fn new(x_position: f32, radius: f32, speed: f32) -> Self {
        Self {
            x_position,
            radius,
            speed,
        }
    }

    /// False for splashes that can never perturb anything: non-positive
    /// radius, zero speed, or non-finite inputs.
    pub fn is_effective(&self) -> bool {
        self.x_position.is_finite()
            && self.radius.is_finite()
            && self.speed.is_finite()
            && self.radius > 0.0
            && self.speed != 0.0
    }

    /// Weight in `[0, 1]` given to a column at `position`.
    #[inline]
    pub fn falloff(&self, position: f32) -> f32 {
        let distance = (position - self.x_position).abs();
        if distance >= self.radius {
            return 0.0;
        }
        1.0 - distance / self.radius
    }

    /// Velocity added to a column at `position`.
    #[inline]
    pub fn impulse_at(&self, position: f32) -> f32 {
        if !self.is_effective() {
            return 0.0;
        }
        self.speed * self.falloff(position)
    }
}

/// Applies a splash to the grid's velocities.
///
/// Returns the number of columns inside the footprint; zero means the splash
/// missed the water entirely.
pub fn inject(grid: &mut ColumnGrid, splash: &Splash) -> usize {
    if !splash.is_effective() {
        trace!("Ignoring ineffective splash {:?}", splash);
        return 0;
    }

    let Some(range) = grid.index_range(
        splash.x_position - splash.radius,
        splash.x_position + splash.radius,
    ) else {
        trace!("Splash at {} missed the water", splash.x_position);
        return 0;
    };

    let touched = range.clone().count();
    for index in range {
        let position = grid.position_of(index);
        grid.columns_mut()[index].velocity += splash.impulse_at(position);
    }

    touched
}
