//! The simulation driver.

use bevy_ecs::resource::Resource;
use log::debug;

use super::grid::{Column, ColumnGrid};
use super::integrator::integrate;
use super::propagator::propagate;
use super::splash::{inject, Splash};
use crate::config::{DisplaySettings, SpringParams, WaterStripConfig};
use crate::constants::CALM_EPSILON;
use crate::error::{Result, WaterStripError};

/// Whether splashes are waiting for the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DriverState {
    #[default]
    Idle,
    Splashing,
}

/// A horizontal strip of spring-driven water columns.
///
/// The host calls [`splash`](Self::splash) whenever a body crosses the
/// surface and [`advance`](Self::advance) once per fixed tick, then reads
/// heights for drawing. Queued splashes are applied at the start of the next
/// `advance`, before the spring and spread passes.
#[derive(Resource, Debug, Clone)]
pub struct WaterStrip {
    grid: ColumnGrid,
    params: SpringParams,
    display: DisplaySettings,
    pending: Vec<Splash>,
    steps: u64,
    settled: bool,
}

impl WaterStrip {
    pub fn new(config: &WaterStripConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            grid: ColumnGrid::new(config.width, config.column_spacing)?,
            params: config.params.sanitized(),
            display: config.display.clone(),
            pending: Vec::new(),
            steps: 0,
            settled: true,
        })
    }

    /// Strip with default coefficients and unit column spacing.
    pub fn with_width(width: usize) -> Result<Self> {
        Self::new(&WaterStripConfig::with_width(width))
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn grid(&self) -> &ColumnGrid {
        &self.grid
    }

    pub fn columns(&self) -> &[Column] {
        self.grid.columns()
    }

    pub fn params(&self) -> &SpringParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SpringParams) {
        self.params = params.sanitized();
    }

    /// Sets tension, clamped to `[0, 1]`. Returns the value in effect.
    pub fn set_tension(&mut self, tension: f32) -> f32 {
        self.params.set_tension(tension)
    }

    /// Sets dampening, clamped to `[0, 1]`. Returns the value in effect.
    pub fn set_dampening(&mut self, dampening: f32) -> f32 {
        self.params.set_dampening(dampening)
    }

    /// Sets spread, clamped to `[0, 0.5]`. Returns the value in effect.
    pub fn set_spread(&mut self, spread: f32) -> f32 {
        self.params.set_spread(spread)
    }

    pub fn display(&self) -> &DisplaySettings {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplaySettings {
        &mut self.display
    }

    /// Queues an impact for the next [`advance`](Self::advance).
    ///
    /// Never fails. Splashes with a non-positive radius, zero speed or
    /// non-finite inputs are dropped here; splashes outside the strip are
    /// dropped when applied.
    pub fn splash(&mut self, x_position: f32, radius: f32, speed: f32) {
        let splash = Splash::new(x_position, radius, speed);
        if !splash.is_effective() {
            log::trace!("Dropping splash {:?}", splash);
            return;
        }
        self.pending.push(splash);
    }

    pub fn pending_splashes(&self) -> &[Splash] {
        &self.pending
    }

    pub fn state(&self) -> DriverState {
        if self.pending.is_empty() {
            DriverState::Idle
        } else {
            DriverState::Splashing
        }
    }

    /// Performs one simulation step.
    pub fn advance(&mut self) {
        if !self.pending.is_empty() {
            let count = self.pending.len();
            let mut touched = 0;
            for splash in self.pending.drain(..) {
                touched += inject(&mut self.grid, &splash);
            }
            if touched > 0 {
                self.settled = false;
            }
            debug!("Applied {count} queued splashes to {touched} columns");
        }

        integrate(self.grid.columns_mut(), &self.params);
        propagate(self.grid.columns_mut(), self.params.spread);
        self.steps += 1;

        if !self.settled && self.is_calm(CALM_EPSILON) {
            self.settled = true;
            debug!("Water strip settled after {} steps", self.steps);
        }
    }

    /// Number of completed [`advance`](Self::advance) calls.
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    pub fn height_at(&self, index: usize) -> Result<f32> {
        self.grid.get(index).map(|column| column.height)
    }

    /// Like [`height_at`](Self::height_at) for hosts working with signed
    /// indices. Negative indices are out of range.
    pub fn height_at_signed(&self, index: i64) -> Result<f32> {
        let out_of_range = || WaterStripError::OutOfRange {
            index,
            width: self.width(),
        };
        let index = usize::try_from(index).map_err(|_| out_of_range())?;
        self.height_at(index).map_err(|_| out_of_range())
    }

    /// Velocity the next step will integrate for a column: the stored
    /// velocity plus the impulse of every queued splash.
    pub fn velocity_at(&self, index: usize) -> Result<f32> {
        let column = self.grid.get(index)?;
        let position = self.grid.position_of(index);
        let queued: f32 = self
            .pending
            .iter()
            .map(|splash| splash.impulse_at(position))
            .sum();
        Ok(column.velocity + queued)
    }

    pub fn heights(&self) -> impl Iterator<Item = f32> + '_ {
        self.grid.columns().iter().map(|column| column.height)
    }

    /// Surface height at a horizontal coordinate.
    ///
    /// Stepped sampling returns the column at or left of `x`; interpolated
    /// sampling blends linearly between the two surrounding columns.
    /// Coordinates outside the strip read the nearest boundary column.
    pub fn sample_height(&self, x: f32, interpolated: bool) -> f32 {
        let columns = self.grid.columns();
        let last = columns.len() - 1;

        let mut f = x / self.grid.spacing();
        if f.is_nan() {
            f = 0.0;
        }
        let f = f.clamp(0.0, last as f32);

        let left = f.floor() as usize;
        if !interpolated || left == last {
            return columns[left].height;
        }

        let t = f - left as f32;
        let (a, b) = (columns[left].height, columns[left + 1].height);
        a + (b - a) * t
    }

    /// Largest absolute height across the strip.
    pub fn max_displacement(&self) -> f32 {
        self.heights().fold(0.0_f32, |max, h| max.max(h.abs()))
    }

    /// True when no splash is queued and every column is within `epsilon` of
    /// rest, in both height and velocity.
    pub fn is_calm(&self, epsilon: f32) -> bool {
        self.pending.is_empty()
            && self
                .grid
                .columns()
                .iter()
                .all(|c| c.height.abs() < epsilon && c.velocity.abs() < epsilon)
    }

    /// Returns every column to rest and drops queued splashes.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.pending.clear();
        self.settled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SurfacePreset;
    use rand::Rng;

    fn scenario_strip() -> WaterStrip {
        let config = WaterStripConfig::with_width(10)
            .with_params(SpringParams::new(0.025, 0.025, 0.25));
        WaterStrip::new(&config).unwrap()
    }

    #[test]
    fn test_rejects_zero_width() {
        assert!(matches!(
            WaterStrip::with_width(0),
            Err(WaterStripError::InvalidWidth { width: 0 })
        ));
    }

    #[test]
    fn test_rest_is_fixed_point() {
        let mut strip = WaterStrip::with_width(16).unwrap();
        strip.set_tension(1.0);
        strip.set_dampening(0.5);

        for _ in 0..500 {
            strip.advance();
        }
        assert!(strip.heights().all(|h| h == 0.0));
        assert_eq!(strip.step_count(), 500);
    }

    #[test]
    fn test_scenario_splash_then_advance() {
        let mut strip = scenario_strip();
        strip.splash(5.0, 1.5, -4.0);
        assert_eq!(strip.state(), DriverState::Splashing);

        for i in 0..10 {
            let velocity = strip.velocity_at(i).unwrap();
            if (4..=6).contains(&i) {
                assert!(velocity < 0.0, "column {i}");
            } else {
                assert_eq!(velocity, 0.0, "column {i}");
            }
        }
        // Still queued, columns themselves untouched
        assert!(strip.columns().iter().all(Column::is_at_rest));

        strip.advance();
        assert_eq!(strip.state(), DriverState::Idle);
        for i in 0..10 {
            let height = strip.height_at(i).unwrap();
            assert!(height.is_finite());
            assert!(height.abs() < 4.0);
        }
        assert!(strip.height_at(5).unwrap() < 0.0);
    }

    #[test]
    fn test_locality_on_first_advance() {
        let mut strip = scenario_strip();
        strip.splash(5.0, 1.5, -4.0);
        strip.advance();

        // Propagation only writes velocity, so heights outside the
        // footprint are still at rest after one step.
        for i in (0..=3).chain(7..=9) {
            assert_eq!(strip.height_at(i).unwrap(), 0.0, "column {i}");
        }
    }

    #[test]
    fn test_random_splashes_are_local() {
        let mut rng = rand::thread_rng();

        for _ in 0..100 {
            let mut strip = WaterStrip::with_width(24).unwrap();
            let x0 = rng.gen_range(0.0..24.0);
            let r = rng.gen_range(0.5..4.0);
            strip.splash(x0, r, rng.gen_range(-8.0..-0.5));
            let before: Vec<f32> = (0..24).map(|i| strip.velocity_at(i).unwrap()).collect();

            strip.advance();

            for (i, v) in before.iter().enumerate() {
                if (i as f32 - x0).abs() > r {
                    assert_eq!(*v, 0.0);
                    assert_eq!(strip.height_at(i).unwrap(), 0.0);
                }
            }
        }
    }

    #[test]
    fn test_splash_decays() {
        let mut strip = scenario_strip();
        strip.splash(5.0, 1.5, -4.0);
        strip.advance();
        assert!(strip.max_displacement() > 0.1);

        for _ in 0..3_000 {
            strip.advance();
        }
        assert!(strip.max_displacement() < 1e-3);
        assert!(strip.is_calm(1e-3));
    }

    #[test]
    fn test_heights_stay_finite_under_random_splashes() {
        let mut rng = rand::thread_rng();
        let config = WaterStripConfig::with_width(64).with_preset(SurfacePreset::Choppy);
        let mut strip = WaterStrip::new(&config).unwrap();

        for _ in 0..1_000 {
            if rng.gen_bool(0.1) {
                strip.splash(
                    rng.gen_range(-5.0..70.0),
                    rng.gen_range(0.0..5.0),
                    rng.gen_range(-10.0..10.0),
                );
            }
            strip.advance();
            assert!(strip.heights().all(f32::is_finite));
        }
    }

    #[test]
    fn test_no_wraparound_from_boundaries() {
        let mut strip = WaterStrip::with_width(8).unwrap();
        strip.splash(0.0, 0.5, -3.0);
        strip.advance();
        strip.advance();
        assert_eq!(strip.velocity_at(7).unwrap(), 0.0);
        assert_eq!(strip.height_at(7).unwrap(), 0.0);

        let mut strip = WaterStrip::with_width(8).unwrap();
        strip.splash(7.0, 0.5, -3.0);
        strip.advance();
        strip.advance();
        assert_eq!(strip.velocity_at(0).unwrap(), 0.0);
        assert_eq!(strip.height_at(0).unwrap(), 0.0);
    }

    #[test]
    fn test_range_checking() {
        let strip = WaterStrip::with_width(10).unwrap();
        assert!(strip.height_at(0).is_ok());
        assert!(strip.height_at(9).is_ok());
        assert!(matches!(
            strip.height_at(10),
            Err(WaterStripError::OutOfRange { index: 10, width: 10 })
        ));
        assert!(matches!(
            strip.height_at_signed(-1),
            Err(WaterStripError::OutOfRange { index: -1, width: 10 })
        ));
        assert!(strip.height_at_signed(9).is_ok());
        assert!(strip.velocity_at(10).is_err());
    }

    #[test]
    fn test_missed_splash_is_silent() {
        let mut strip = WaterStrip::with_width(10).unwrap();
        strip.splash(5.0, 0.0, -4.0);
        strip.splash(5.0, -1.0, -4.0);
        assert_eq!(strip.state(), DriverState::Idle);

        strip.splash(50.0, 2.0, -4.0);
        strip.advance();
        assert!(strip.columns().iter().all(Column::is_at_rest));
    }

    #[test]
    fn test_queued_splashes_accumulate() {
        let mut once = WaterStrip::with_width(10).unwrap();
        once.splash(5.0, 1.0, -2.0);

        let mut twice = WaterStrip::with_width(10).unwrap();
        twice.splash(5.0, 1.0, -1.0);
        twice.splash(5.0, 1.0, -1.0);
        assert_eq!(twice.pending_splashes().len(), 2);

        assert_eq!(once.velocity_at(5).unwrap(), twice.velocity_at(5).unwrap());
        once.advance();
        twice.advance();
        assert_eq!(once.columns(), twice.columns());
    }

    #[test]
    fn test_setters_clamp() {
        let mut strip = WaterStrip::with_width(4).unwrap();
        assert_eq!(strip.set_tension(7.0), 1.0);
        assert_eq!(strip.set_dampening(-1.0), 0.0);
        assert_eq!(strip.set_spread(0.6), 0.5);
        assert_eq!(strip.set_spread(f32::NAN), 0.5);
        assert_eq!(strip.params().spread, 0.5);
    }

    #[test]
    fn test_sample_height() {
        let config = WaterStripConfig {
            column_spacing: 2.0,
            ..WaterStripConfig::with_width(3)
        };
        let mut strip = WaterStrip::new(&config).unwrap();
        strip.grid.columns_mut()[0].height = 0.0;
        strip.grid.columns_mut()[1].height = 1.0;
        strip.grid.columns_mut()[2].height = -1.0;

        assert_eq!(strip.sample_height(1.0, false), 0.0);
        assert!((strip.sample_height(1.0, true) - 0.5).abs() < 1e-6);
        assert!((strip.sample_height(3.0, true) - 0.0).abs() < 1e-6);
        assert_eq!(strip.sample_height(3.0, false), 1.0);
        assert_eq!(strip.sample_height(-5.0, true), 0.0);
        assert_eq!(strip.sample_height(100.0, true), -1.0);
        assert_eq!(strip.sample_height(f32::NAN, true), 0.0);
    }

    #[test]
    fn test_single_column_strip() {
        let mut strip = WaterStrip::with_width(1).unwrap();
        strip.splash(0.0, 1.0, 2.0);
        strip.advance();

        assert!(strip.height_at(0).unwrap() > 0.0);
        assert_eq!(strip.sample_height(3.0, true), strip.height_at(0).unwrap());
    }

    #[test]
    fn test_reset() {
        let mut strip = scenario_strip();
        strip.splash(5.0, 1.5, -4.0);
        strip.advance();
        strip.splash(2.0, 1.0, 1.0);

        strip.reset();
        assert_eq!(strip.state(), DriverState::Idle);
        assert!(strip.is_calm(f32::EPSILON));
        assert_eq!(strip.max_displacement(), 0.0);
    }
}
