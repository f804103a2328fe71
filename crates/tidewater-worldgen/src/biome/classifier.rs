//! Biome classification: maps a tile's raw fields to a [`Biome`].

use serde::{Deserialize, Serialize};

use super::Biome;
use crate::source::Climate;

/// Strategy that proposes a biome for a tile's raw fields.
///
/// Implementations must be pure: the same [`Climate`] always yields the same
/// biome, independent of neighbouring tiles. Any `Fn(Climate) -> Biome` closure
/// is a classifier, which makes calibration variants cheap to express.
pub trait BiomeClassifier: Send + Sync {
    fn classify(&self, climate: Climate) -> Biome;
}

impl<F> BiomeClassifier for F
where
    F: Fn(Climate) -> Biome + Send + Sync,
{
    fn classify(&self, climate: Climate) -> Biome {
        self(climate)
    }
}

/// Errors reported by [`ClassifierThresholds::validate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    /// A threshold is NaN or outside `[0, 1]`.
    #[error("threshold `{name}` = {value} is outside [0, 1]")]
    OutOfRange { name: &'static str, value: f64 },

    /// Two thresholds that must be ordered are not.
    #[error("threshold `{lower}` ({lower_value}) must not exceed `{upper}` ({upper_value})")]
    Misordered {
        lower: &'static str,
        lower_value: f64,
        upper: &'static str,
        upper_value: f64,
    },
}

/// Tunable cut-offs for the default first-match classifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
    /// Elevation below this is deep ocean.
    pub deep_ocean: f64,
    /// Elevation below this is shallow ocean.
    pub shallow_ocean: f64,
    /// Elevation below this (and above the oceans) is beach.
    pub beach: f64,
    /// Elevation above this is a peak: snow or mountain.
    pub peak: f64,
    /// Peaks colder than this are snow.
    pub peak_snow_temperature: f64,
    /// Moisture below this is arid.
    pub dry: f64,
    /// Moisture above this is saturated.
    pub wet: f64,
    /// Temperature below this is cold.
    pub cold: f64,
    /// Temperature above this is hot.
    pub hot: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            deep_ocean: 0.3,
            shallow_ocean: 0.4,
            beach: 0.45,
            peak: 0.9,
            peak_snow_temperature: 0.4,
            dry: 0.15,
            wet: 0.85,
            cold: 0.2,
            hot: 0.8,
        }
    }
}

impl ClassifierThresholds {
    /// Check every value is in `[0, 1]` and the bands are ordered.
    pub fn validate(&self) -> Result<(), ThresholdError> {
        let named = [
            ("deep_ocean", self.deep_ocean),
            ("shallow_ocean", self.shallow_ocean),
            ("beach", self.beach),
            ("peak", self.peak),
            ("peak_snow_temperature", self.peak_snow_temperature),
            ("dry", self.dry),
            ("wet", self.wet),
            ("cold", self.cold),
            ("hot", self.hot),
        ];
        for (name, value) in named {
            if !(0.0..=1.0).contains(&value) {
                return Err(ThresholdError::OutOfRange { name, value });
            }
        }

        let ordered = [
            (("deep_ocean", self.deep_ocean), ("shallow_ocean", self.shallow_ocean)),
            (("shallow_ocean", self.shallow_ocean), ("beach", self.beach)),
            (("beach", self.beach), ("peak", self.peak)),
            (("dry", self.dry), ("wet", self.wet)),
            (("cold", self.cold), ("hot", self.hot)),
        ];
        for ((lower, lower_value), (upper, upper_value)) in ordered {
            if lower_value > upper_value {
                return Err(ThresholdError::Misordered {
                    lower,
                    lower_value,
                    upper,
                    upper_value,
                });
            }
        }

        Ok(())
    }
}

impl BiomeClassifier for ClassifierThresholds {
    fn classify(&self, climate: Climate) -> Biome {
        let Climate {
            elevation: e,
            moisture: m,
            temperature: t,
        } = climate;

        if e < self.deep_ocean || e < self.shallow_ocean {
            return Biome::Ocean;
        }
        if e < self.beach {
            return Biome::Beach;
        }
        if e > self.peak {
            return if t < self.peak_snow_temperature {
                Biome::Snow
            } else {
                Biome::Mountain
            };
        }
        if m < self.dry {
            return if t > self.hot {
                Biome::Desert
            } else {
                Biome::Savanna
            };
        }
        if m > self.wet {
            return if t > self.hot {
                Biome::Jungle
            } else {
                Biome::Swamp
            };
        }
        if t < self.cold {
            Biome::Taiga
        } else if t > self.hot {
            Biome::Tropical
        } else {
            Biome::Forest
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(e: f64, m: f64, t: f64) -> Biome {
        ClassifierThresholds::default().classify(Climate::new(e, m, t))
    }

    #[test]
    fn test_low_elevation_is_ocean() {
        assert_eq!(classify(0.0, 0.5, 0.5), Biome::Ocean);
        assert_eq!(classify(0.29, 0.5, 0.5), Biome::Ocean);
        assert_eq!(classify(0.35, 0.0, 1.0), Biome::Ocean);
        assert_eq!(classify(0.3999, 1.0, 0.0), Biome::Ocean);
    }

    #[test]
    fn test_beach_band() {
        assert_eq!(classify(0.4, 0.5, 0.5), Biome::Beach);
        assert_eq!(classify(0.449, 0.0, 1.0), Biome::Beach);
        assert_ne!(classify(0.45, 0.5, 0.5), Biome::Beach);
    }

    #[test]
    fn test_peaks_split_on_temperature() {
        assert_eq!(classify(0.95, 0.5, 0.1), Biome::Snow);
        assert_eq!(classify(0.95, 0.5, 0.39), Biome::Snow);
        assert_eq!(classify(0.95, 0.5, 0.4), Biome::Mountain);
        assert_eq!(classify(0.95, 0.0, 0.9), Biome::Mountain);
        // exactly at the peak threshold is not a peak
        assert_eq!(classify(0.9, 0.5, 0.5), Biome::Forest);
    }

    #[test]
    fn test_dry_band() {
        assert_eq!(classify(0.6, 0.1, 0.9), Biome::Desert);
        assert_eq!(classify(0.6, 0.1, 0.5), Biome::Savanna);
        assert_eq!(classify(0.6, 0.1, 0.8), Biome::Savanna);
    }

    #[test]
    fn test_wet_band() {
        assert_eq!(classify(0.6, 0.9, 0.9), Biome::Jungle);
        assert_eq!(classify(0.6, 0.9, 0.1), Biome::Swamp);
    }

    #[test]
    fn test_temperate_band() {
        assert_eq!(classify(0.6, 0.5, 0.1), Biome::Taiga);
        assert_eq!(classify(0.6, 0.5, 0.9), Biome::Tropical);
        assert_eq!(classify(0.6, 0.5, 0.5), Biome::Forest);
        assert_eq!(classify(0.6, 0.15, 0.2), Biome::Forest);
    }

    #[test]
    fn test_classification_is_pure() {
        let thresholds = ClassifierThresholds::default();
        for i in 0..500 {
            let c = Climate::new(
                (i as f64 * 0.013) % 1.0,
                (i as f64 * 0.029) % 1.0,
                (i as f64 * 0.047) % 1.0,
            );
            assert_eq!(thresholds.classify(c), thresholds.classify(c));
        }
    }

    #[test]
    fn test_tuned_thresholds_change_coverage() {
        let tuned = ClassifierThresholds {
            deep_ocean: 0.1,
            shallow_ocean: 0.15,
            beach: 0.2,
            ..Default::default()
        };
        let c = Climate::new(0.35, 0.5, 0.5);
        assert_eq!(ClassifierThresholds::default().classify(c), Biome::Ocean);
        assert_eq!(tuned.classify(c), Biome::Forest);
    }

    #[test]
    fn test_closure_classifier() {
        let all_desert = |_: Climate| Biome::Desert;
        assert_eq!(all_desert.classify(Climate::new(0.0, 0.0, 0.0)), Biome::Desert);
    }

    #[test]
    fn test_default_thresholds_validate() {
        assert_eq!(ClassifierThresholds::default().validate(), Ok(()));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let t = ClassifierThresholds {
            hot: 1.5,
            ..Default::default()
        };
        assert_eq!(
            t.validate(),
            Err(ThresholdError::OutOfRange {
                name: "hot",
                value: 1.5
            })
        );

        let nan = ClassifierThresholds {
            dry: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            nan.validate(),
            Err(ThresholdError::OutOfRange { name: "dry", .. })
        ));
    }

    #[test]
    fn test_misordered_rejected() {
        let t = ClassifierThresholds {
            beach: 0.35,
            ..Default::default()
        };
        let err = t.validate().unwrap_err();
        assert!(matches!(
            err,
            ThresholdError::Misordered {
                lower: "shallow_ocean",
                upper: "beach",
                ..
            }
        ));
        assert!(err.to_string().contains("shallow_ocean"));
    }
}
