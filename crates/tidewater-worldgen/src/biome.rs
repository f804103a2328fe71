//! Biome system: tags, static descriptor table, and the pluggable classifier.
//!
//! Classification is first-match-wins over elevation, then moisture, then
//! temperature bands. The threshold table is the default strategy; callers
//! may inject any other [`BiomeClassifier`].

mod classifier;
mod def;

pub use classifier::{BiomeClassifier, ClassifierThresholds, ThresholdError};
pub use def::{BIOME_DESCRIPTORS, Biome, BiomeDescriptor, UnknownBiome};
