//! Deterministic, infinite 2D island world generation: layered noise
//! elevation, climate-driven biomes, small-island suppression, and coastal
//! and landmass analysis over a lazily generated tile cache.

mod coastal;
mod config;
mod heightmap;
mod landmass;
mod seed;
mod source;
mod tile;
mod world;

pub mod biome;
pub mod debug_viz;

pub use biome::{
    BIOME_DESCRIPTORS, Biome, BiomeClassifier, BiomeDescriptor, ClassifierThresholds,
    ThresholdError, UnknownBiome,
};
pub use coastal::{CoastalSurvey, LandSample, NeighborCounts, WaterSample};
pub use config::{SuppressionLimits, ValidationError, WorldGenConfig};
pub use heightmap::{
    AXIS_SEED_STRIDE, Axis, ClimateScales, ElevationLayer, ElevationParams, ElevationSynthesizer,
    NoiseField,
};
pub use landmass::LandmassReport;
pub use seed::{LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER, SeededStream, positional_random};
pub use source::{Climate, NoiseTerrain, StampedTerrain, TerrainSource};
pub use tile::{ChunkStore, Tile};
pub use world::World;
