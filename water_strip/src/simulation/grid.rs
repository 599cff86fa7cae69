//! Column storage for the water strip.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WaterStripError};

/// A single vertical slice of water.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Offset from rest level (0 = undisturbed)
    pub height: f32,
    /// Rate of change of `height` per step
    pub velocity: f32,
}

impl Column {
    #[inline]
    pub fn is_at_rest(&self) -> bool {
        self.height == 0.0 && self.velocity == 0.0
    }
}

/// Fixed-width row of columns, ordered left to right.
///
/// Column `i` sits at horizontal coordinate `i * spacing`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnGrid {
    columns: Vec<Column>,
    spacing: f32,
}

impl ColumnGrid {
    pub fn new(width: usize, spacing: f32) -> Result<Self> {
        if width < 1 {
            return Err(WaterStripError::InvalidWidth { width });
        }
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(WaterStripError::InvalidColumnSpacing { spacing });
        }

        Ok(Self {
            columns: vec![Column::default(); width],
            spacing,
        })
    }

    /// Number of columns. Never zero.
    #[inline]
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Horizontal coordinate of a column.
    #[inline]
    pub fn position_of(&self, index: usize) -> f32 {
        index as f32 * self.spacing
    }

    /// Distance covered by the strip from the first to the last column.
    pub fn span(&self) -> f32 {
        self.position_of(self.width() - 1)
    }

    pub fn get(&self, index: usize) -> Result<&Column> {
        let width = self.width();
        self.columns
            .get(index)
            .ok_or(WaterStripError::OutOfRange {
                index: index as i64,
                width,
            })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Column> {
        let width = self.width();
        self.columns
            .get_mut(index)
            .ok_or(WaterStripError::OutOfRange {
                index: index as i64,
                width,
            })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// Indices of the columns whose position lies within `[min_x, max_x]`.
    /// Returns `None` when no column falls inside.
    pub fn index_range(&self, min_x: f32, max_x: f32) -> Option<RangeInclusive<usize>> {
        if min_x.is_nan() || max_x.is_nan() || min_x > max_x {
            return None;
        }

        let last = (self.width() - 1) as f32;
        let first = (min_x / self.spacing).ceil().max(0.0);
        let end = (max_x / self.spacing).floor().min(last);
        if first > end {
            return None;
        }

        Some(first as usize..=end as usize)
    }

    /// Puts every column back at rest.
    pub fn reset(&mut self) {
        self.columns.fill(Column::default());
    }
}
