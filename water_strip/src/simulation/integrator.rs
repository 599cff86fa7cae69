//! Per-column damped spring step.
//!
//! Each column is an independent oscillator around rest height. Neighbours
//! only interact through the [propagator](super::propagator).

use super::grid::Column;
use crate::config::SpringParams;

impl Column {
    /// Advances this column by one step: spring acceleration, dampening,
    /// then the height update.
    #[inline]
    pub fn integrate(&mut self, tension: f32, dampening: f32) {
        let acceleration = -tension * self.height;
        self.velocity += acceleration;
        self.velocity *= 1.0 - dampening;
        self.height += self.velocity;
    }
}

/// Runs the spring step over every column.
pub fn integrate(columns: &mut [Column], params: &SpringParams) {
    for column in columns.iter_mut() {
        column.integrate(params.tension, params.dampening);
    }
}
