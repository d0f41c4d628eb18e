//! Rendering and stepping configuration.

use crate::{Error, Result};
use std::f64::consts::TAU;

/// Upper bound on unit-circle samples per frame; bounds `circle_step` from below.
pub const MAX_CIRCLE_SAMPLES: f64 = 100_000.0;

/// Stroke colors (CSS hex strings).
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub grid: String,
    pub axes: String,
    /// The reference (untransformed) unit circle.
    pub circle: String,
    pub basis_i: String,
    pub basis_j: String,
    /// The transformed image of the unit circle.
    pub curve: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            grid: "#3b4252".to_string(),
            axes: "#88c0d0".to_string(),
            circle: "#5e81ac".to_string(),
            basis_i: "#bf616a".to_string(),
            basis_j: "#a3be8c".to_string(),
            curve: "#d08770".to_string(),
        }
    }
}

/// Visualizer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct VizConfig {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    /// Pixels per logical unit.
    pub scale: f64,
    /// Gridlines are drawn at integers in `-grid_extent..=grid_extent`.
    pub grid_extent: i32,
    /// Percentage points added per tick (2 → 50 ticks per leg).
    pub progress_step: u32,
    /// Angular sampling step (radians) for the transformed circle.
    ///
    /// At least `2π / MAX_CIRCLE_SAMPLES`.
    pub circle_step: f64,
    /// Arrowhead stroke length in pixels.
    pub arrow_size: f64,
    pub palette: Palette,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
            scale: 60.0,
            grid_extent: 5,
            progress_step: 2,
            circle_step: 0.1,
            arrow_size: 12.0,
            palette: Palette::default(),
        }
    }
}

impl VizConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.width > 0.0 && self.width.is_finite())
            || !(self.height > 0.0 && self.height.is_finite())
        {
            return Err(Error::Domain("canvas size must be positive and finite"));
        }
        if !(self.scale > 0.0) || !self.scale.is_finite() {
            return Err(Error::Domain("scale must be positive and finite"));
        }
        if self.grid_extent < 0 {
            return Err(Error::Domain("grid_extent must be >= 0"));
        }
        if !(1..=100).contains(&self.progress_step) {
            return Err(Error::Domain("progress_step must be in 1..=100"));
        }
        if !(self.circle_step > 0.0) || !self.circle_step.is_finite() {
            return Err(Error::Domain("circle_step must be positive and finite"));
        }
        if TAU / self.circle_step > MAX_CIRCLE_SAMPLES {
            return Err(Error::Domain("circle_step too small: too many circle samples"));
        }
        if !(self.arrow_size >= 0.0) || !self.arrow_size.is_finite() {
            return Err(Error::Domain("arrow_size must be finite and >= 0"));
        }
        Ok(())
    }
}
