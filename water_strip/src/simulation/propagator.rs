//! Lateral wave spread between neighbouring columns.
//!
//! Two sweeps run back to back, first left to right and then right to left.
//! Both read heights as left by the integrator and only write velocities, so
//! the spread shows up in heights on the next integrator pass. The sweep
//! order is part of the wave shape and must not change.

use super::grid::Column;

/// Applies both spread sweeps. Strips narrower than two columns are untouched.
pub fn propagate(columns: &mut [Column], spread: f32) {
    let width = columns.len();
    if width < 2 {
        return;
    }

    for i in 1..width {
        let delta = spread * (columns[i - 1].height - columns[i].height);
        columns[i].velocity += delta;
        columns[i - 1].velocity -= delta;
    }

    for i in (0..width - 1).rev() {
        let delta = spread * (columns[i + 1].height - columns[i].height);
        columns[i].velocity += delta;
        columns[i + 1].velocity -= delta;
    }
}
