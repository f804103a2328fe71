//! Noise fields and layered island elevation.
//!
//! [`NoiseField`] holds three decorrelated simplex generators (elevation,
//! moisture, temperature). [`ElevationSynthesizer`] stacks thresholded layers
//! of the elevation generator at distinct frequencies and offsets on top of a
//! low ocean baseline, which yields sparse clustered islands instead of
//! uniform speckle.

use noise::{NoiseFn, Simplex};
use serde::{Deserialize, Serialize};

/// Seed distance between the three generators of a [`NoiseField`].
pub const AXIS_SEED_STRIDE: i64 = 1000;

/// One of the three scalar fields sampled per tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Height above the sea floor.
    Elevation,
    /// Wetness.
    Moisture,
    /// Warmth.
    Temperature,
}

/// Three simplex generators seeded at `seed`, `seed + 1000`, `seed + 2000`.
pub struct NoiseField {
    seed: i64,
    elevation: Simplex,
    moisture: Simplex,
    temperature: Simplex,
}

impl NoiseField {
    /// Create a field for the given world seed.
    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            elevation: Simplex::new(seed as u32),
            moisture: Simplex::new(seed.wrapping_add(AXIS_SEED_STRIDE) as u32),
            temperature: Simplex::new(seed.wrapping_add(2 * AXIS_SEED_STRIDE) as u32),
        }
    }

    /// The world seed the field was built from.
    pub fn seed(&self) -> i64 {
        self.seed
    }

    /// Sample an axis at a point in noise space, normalized to `[0, 1]`.
    pub fn get(&self, axis: Axis, x: f64, y: f64) -> f64 {
        let generator = match axis {
            Axis::Elevation => &self.elevation,
            Axis::Moisture => &self.moisture,
            Axis::Temperature => &self.temperature,
        };
        let raw = generator.get([x, y]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// A single thresholded contribution to elevation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElevationLayer {
    /// Tile-to-noise frequency. Lower values give broader shapes.
    pub scale: f64,
    /// Offset added in noise space so layers sample unrelated regions.
    pub offset: f64,
    /// Normalized noise must exceed this before the layer contributes.
    pub threshold: f64,
    /// Multiplier applied to `noise - threshold`.
    pub gain: f64,
}

impl ElevationLayer {
    const fn new(scale: f64, offset: f64, threshold: f64, gain: f64) -> Self {
        Self {
            scale,
            offset,
            threshold,
            gain,
        }
    }
}

/// Baseline plus layer table for [`ElevationSynthesizer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevationParams {
    /// Elevation before any layer contributes. Sits well inside ocean.
    pub baseline: f64,
    /// Layers applied in order; contributions are summed.
    pub layers: Vec<ElevationLayer>,
}

impl Default for ElevationParams {
    fn default() -> Self {
        Self {
            baseline: 0.2,
            layers: vec![
                // continents
                ElevationLayer::new(0.025, 0.0, 0.70, 1.8),
                // islands
                ElevationLayer::new(0.12, 500.0, 0.75, 1.3),
                // atolls
                ElevationLayer::new(0.2, 1000.0, 0.85, 1.0),
                // chains
                ElevationLayer::new(0.06, 1500.0, 0.78, 1.5),
                ElevationLayer::new(0.06, 2500.0, 0.80, 1.2),
                ElevationLayer::new(0.06, 3500.0, 0.82, 1.0),
            ],
        }
    }
}

/// Sampling frequencies for the moisture and temperature axes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateScales {
    /// Tile-to-noise frequency for moisture.
    pub moisture: f64,
    /// Tile-to-noise frequency for temperature.
    pub temperature: f64,
}

impl Default for ClimateScales {
    fn default() -> Self {
        Self {
            moisture: 0.05,
            temperature: 0.03,
        }
    }
}

/// Builds tile elevation from a [`NoiseField`] and an [`ElevationParams`] table.
#[derive(Clone, Debug, Default)]
pub struct ElevationSynthesizer {
    params: ElevationParams,
}

impl ElevationSynthesizer {
    /// Create a synthesizer with the given layer table.
    pub fn new(params: ElevationParams) -> Self {
        Self { params }
    }

    /// Elevation at a tile, clamped to `[0, 1]`.
    pub fn elevation(&self, field: &NoiseField, x: i32, y: i32) -> f64 {
        let (fx, fy) = (f64::from(x), f64::from(y));
        let mut elevation = self.params.baseline;

        for layer in &self.params.layers {
            let n = field.get(
                Axis::Elevation,
                fx * layer.scale + layer.offset,
                fy * layer.scale + layer.offset,
            );
            if n > layer.threshold {
                elevation += (n - layer.threshold) * layer.gain;
            }
        }

        elevation.clamp(0.0, 1.0)
    }

    /// Return a reference to the layer table.
    pub fn params(&self) -> &ElevationParams {
        &self.params
    }
}
