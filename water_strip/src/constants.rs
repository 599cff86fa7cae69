pub const TICKS_PER_SECOND: u64 = 60;

pub const DEFAULT_WIDTH: usize = 100;
pub const DEFAULT_COLUMN_SPACING: f32 = 1.0;

pub const DEFAULT_TENSION: f32 = 0.025;
pub const DEFAULT_DAMPENING: f32 = 0.025;
pub const DEFAULT_SPREAD: f32 = 0.25;

pub const MAX_TENSION: f32 = 1.0;
pub const MAX_DAMPENING: f32 = 1.0;
pub const MAX_SPREAD: f32 = 0.5;

/// Displacement (and velocity) below which a strip counts as settled.
pub const CALM_EPSILON: f32 = 1e-4;

pub const DEFAULT_DISPLAY_HEIGHT: f32 = 100.0;
pub const DEFAULT_WATER_COLOR: [f32; 4] = [0.18, 0.47, 0.82, 0.8];
