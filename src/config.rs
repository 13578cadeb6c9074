//! Terrain generation configuration
//!
//! Layout bounds, slope run limits and the segment weight vector. Values are fixed once a
//! generator is built from them; `validate` is the single gate every generator passes through.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::segment::SegmentType;

/// Allowed drift between the weight sum and 1.0
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Deepest allowed height. Glyphs land up to two rows below it and must fit a terminal row.
pub const MAX_SCREEN_BOTTOM: i32 = u16::MAX as i32 - 2;

/// Relative likelihood of each segment type when a new feature is sampled.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentWeights {
    pub ground: f64,
    pub cavity: f64,
    pub slope_up: f64,
    pub slope_down: f64,
    pub spike: f64,
}

impl Default for SegmentWeights {
    fn default() -> Self {
        Self {
            ground: 0.35,
            cavity: 0.10,
            slope_up: 0.20,
            slope_down: 0.20,
            spike: 0.15,
        }
    }
}

impl SegmentWeights {
    /// Weights in `SegmentType::ALL` order.
    pub fn as_array(&self) -> [f64; 5] {
        [self.ground, self.cavity, self.slope_up, self.slope_down, self.spike]
    }

    pub fn get(&self, kind: SegmentType) -> f64 {
        self.as_array()[kind.index()]
    }

    pub fn sum(&self) -> f64 {
        self.as_array().iter().sum()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for kind in SegmentType::ALL {
            let value = self.get(kind);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { segment: kind.name(), value });
            }
        }

        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightsNotNormalized(sum));
        }
        Ok(())
    }
}

/// Terrain strip configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Number of visible columns
    pub screen_width: usize,
    /// Smallest allowed height (highest row on screen)
    pub screen_top: i32,
    /// Largest allowed height (lowest row on screen)
    pub screen_bottom: i32,
    /// Height of the initial flat strip
    pub ground_start: i32,
    /// Exclusive upper bound for sampled slope run lengths
    pub max_slope_run_length: u32,
    pub weights: SegmentWeights,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            screen_width: 40,
            screen_top: 1,
            screen_bottom: 5,
            ground_start: 5,
            max_slope_run_length: 3,
            weights: SegmentWeights::default(),
        }
    }
}

impl TerrainConfig {
    /// Load a configuration from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reject configurations that would produce undefined terrain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if self.screen_top < 0 {
            return Err(ConfigError::NegativeTop(self.screen_top));
        }
        if self.screen_bottom > MAX_SCREEN_BOTTOM {
            return Err(ConfigError::BottomTooDeep {
                bottom: self.screen_bottom,
                max: MAX_SCREEN_BOTTOM,
            });
        }
        if self.screen_top > self.screen_bottom {
            return Err(ConfigError::InvertedBounds {
                top: self.screen_top,
                bottom: self.screen_bottom,
            });
        }
        if !(self.screen_top..=self.screen_bottom).contains(&self.ground_start) {
            return Err(ConfigError::GroundOutOfBounds {
                start: self.ground_start,
                top: self.screen_top,
                bottom: self.screen_bottom,
            });
        }
        if self.max_slope_run_length < 2 {
            return Err(ConfigError::SlopeRunTooShort(self.max_slope_run_length));
        }
        self.weights.validate()
    }

    /// Clamp a height into the vertical bounds.
    #[inline]
    pub fn clamp_height(&self, height: i32) -> i32 {
        height.clamp(self.screen_top, self.screen_bottom)
    }
}
