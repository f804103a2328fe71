//! Field sources: where a tile's elevation, moisture and temperature come from.
//!
//! The world generator and the landmass suppression probe both read fields
//! through [`TerrainSource`], so there is exactly one code path producing a
//! tile's raw values.

use glam::IVec2;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::heightmap::{Axis, ClimateScales, ElevationParams, ElevationSynthesizer, NoiseField};

/// The three scalar fields of one tile, each in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Climate {
    pub elevation: f64,
    pub moisture: f64,
    pub temperature: f64,
}

impl Climate {
    pub const fn new(elevation: f64, moisture: f64, temperature: f64) -> Self {
        Self {
            elevation,
            moisture,
            temperature,
        }
    }
}

/// Produces raw fields for any integer coordinate.
///
/// Implementations must be pure for a given seed: the same coordinate always
/// yields the same [`Climate`].
pub trait TerrainSource: Send + Sync {
    /// Fields at tile `(x, y)`.
    fn sample(&self, x: i32, y: i32) -> Climate;

    /// Rebuild internal generators for a new world seed.
    fn reseed(&mut self, seed: i64);
}

/// The production source: layered simplex elevation plus moisture and
/// temperature noise.
pub struct NoiseTerrain {
    field: NoiseField,
    synthesizer: ElevationSynthesizer,
    scales: ClimateScales,
}

impl NoiseTerrain {
    /// Create a source for `seed` with the given layer table and climate scales.
    pub fn new(seed: i64, elevation: ElevationParams, scales: ClimateScales) -> Self {
        Self {
            field: NoiseField::new(seed),
            synthesizer: ElevationSynthesizer::new(elevation),
            scales,
        }
    }

    /// The underlying noise field.
    pub fn field(&self) -> &NoiseField {
        &self.field
    }
}

impl TerrainSource for NoiseTerrain {
    fn sample(&self, x: i32, y: i32) -> Climate {
        let (fx, fy) = (f64::from(x), f64::from(y));
        Climate {
            elevation: self.synthesizer.elevation(&self.field, x, y),
            moisture: self.field.get(
                Axis::Moisture,
                fx * self.scales.moisture,
                fy * self.scales.moisture,
            ),
            temperature: self.field.get(
                Axis::Temperature,
                fx * self.scales.temperature,
                fy * self.scales.temperature,
            ),
        }
    }

    fn reseed(&mut self, seed: i64) {
        self.field = NoiseField::new(seed);
    }
}

/// A hand-authored field: a uniform background with individually stamped
/// tiles. Ignores reseeding.
///
/// Useful for calibration scenarios and for exercising geometric queries on
/// exact layouts.
#[derive(Clone, Debug)]
pub struct StampedTerrain {
    background: Climate,
    stamps: FxHashMap<IVec2, Climate>,
}

impl StampedTerrain {
    /// Deep-ocean climate used by [`StampedTerrain::ocean`].
    pub const OCEAN: Climate = Climate::new(0.1, 0.5, 0.5);
    /// Beach climate under the default thresholds.
    pub const BEACH: Climate = Climate::new(0.42, 0.5, 0.5);
    /// Temperate forest climate under the default thresholds.
    pub const FOREST: Climate = Climate::new(0.6, 0.5, 0.5);
    /// Mountain climate under the default thresholds.
    pub const MOUNTAIN: Climate = Climate::new(0.95, 0.5, 0.5);

    /// Create a field where every unstamped tile has `background`.
    pub fn new(background: Climate) -> Self {
        Self {
            background,
            stamps: FxHashMap::default(),
        }
    }

    /// An endless ocean.
    pub fn ocean() -> Self {
        Self::new(Self::OCEAN)
    }

    /// An endless forest.
    pub fn land() -> Self {
        Self::new(Self::FOREST)
    }

    /// Override a single tile.
    pub fn stamp(&mut self, x: i32, y: i32, climate: Climate) -> &mut Self {
        self.stamps.insert(IVec2::new(x, y), climate);
        self
    }

    /// Override every tile in the `width` x `height` rectangle whose minimum
    /// corner is `(x, y)`.
    pub fn stamp_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        climate: Climate,
    ) -> &mut Self {
        for dy in 0..height as i32 {
            for dx in 0..width as i32 {
                self.stamps.insert(IVec2::new(x + dx, y + dy), climate);
            }
        }
        self
    }
}

impl TerrainSource for StampedTerrain {
    fn sample(&self, x: i32, y: i32) -> Climate {
        self.stamps
            .get(&IVec2::new(x, y))
            .copied()
            .unwrap_or(self.background)
    }

    fn reseed(&mut self, _seed: i64) {}
}
