//! Generation parameters for a [`World`](crate::World).

use serde::{Deserialize, Serialize};

use crate::biome::{ClassifierThresholds, ThresholdError};
use crate::heightmap::{ClimateScales, ElevationParams};

/// Limits for the inline small-landmass suppression probe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuppressionLimits {
    /// Maximum tiles the probe visits per generated land tile.
    pub probe_cap: usize,
    /// Land components smaller than this become ocean. `0` or `1` disables
    /// suppression.
    pub min_landmass: usize,
}

impl SuppressionLimits {
    /// Limits that never suppress anything.
    pub const DISABLED: Self = Self {
        probe_cap: 0,
        min_landmass: 0,
    };

    /// Returns `true` if the probe has any effect.
    pub fn is_enabled(&self) -> bool {
        self.min_landmass > 1
    }
}

impl Default for SuppressionLimits {
    fn default() -> Self {
        Self {
            probe_cap: 20,
            min_landmass: 9,
        }
    }
}

/// Errors reported by [`WorldGenConfig::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error(transparent)]
    Thresholds(#[from] ThresholdError),

    /// The probe could never see enough tiles to keep any land.
    #[error("suppression probe cap {probe_cap} is below the minimum landmass {min_landmass}")]
    ProbeCapTooSmall {
        probe_cap: usize,
        min_landmass: usize,
    },
}

/// Everything needed to build a deterministic world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    /// World seed. Any integer is accepted.
    pub seed: i64,
    /// Cut-offs for the default classifier.
    pub thresholds: ClassifierThresholds,
    /// Elevation baseline and layer table.
    pub elevation: ElevationParams,
    /// Moisture and temperature sampling frequencies.
    pub climate: ClimateScales,
    /// Small-island removal.
    pub suppression: SuppressionLimits,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            thresholds: ClassifierThresholds::default(),
            elevation: ElevationParams::default(),
            climate: ClimateScales::default(),
            suppression: SuppressionLimits::default(),
        }
    }
}

impl WorldGenConfig {
    /// Check thresholds and suppression limits for consistency.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.thresholds.validate()?;

        let SuppressionLimits {
            probe_cap,
            min_landmass,
        } = self.suppression;
        if self.suppression.is_enabled() && probe_cap < min_landmass {
            return Err(ValidationError::ProbeCapTooSmall {
                probe_cap,
                min_landmass,
            });
        }

        Ok(())
    }
}
