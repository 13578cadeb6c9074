//! Errors raised while building a terrain generator.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected or unreadable terrain configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("screen width must be at least 1")]
    ZeroWidth,

    #[error("screen top {top} is greater than screen bottom {bottom}")]
    InvertedBounds { top: i32, bottom: i32 },

    #[error("screen top must not be negative, got {0}")]
    NegativeTop(i32),

    #[error("screen bottom {bottom} leaves no room for glyph rows (max {max})")]
    BottomTooDeep { bottom: i32, max: i32 },

    #[error("ground start {start} lies outside [{top}, {bottom}]")]
    GroundOutOfBounds { start: i32, top: i32, bottom: i32 },

    #[error("max slope run length must be at least 2, got {0}")]
    SlopeRunTooShort(u32),

    #[error("weight for {segment} must be finite and non-negative, got {value}")]
    InvalidWeight { segment: &'static str, value: f64 },

    #[error("segment weights sum to {0}, expected 1.0")]
    WeightsNotNormalized(f64),

    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
