//! Endless-runner terrain generation library
//!
//! Re-exports modules for use by the terminal front end and tools.

pub mod ascii;
pub mod config;
pub mod error;
pub mod generator;
pub mod sampler;
pub mod segment;
pub mod shared;
pub mod strip;

pub use config::{SegmentWeights, TerrainConfig};
pub use error::ConfigError;
pub use generator::{SeededGenerator, TerrainGenerator};
pub use sampler::{SegmentSampler, WeightTable, WeightedSampler};
pub use segment::{Segment, SegmentType};
pub use shared::{SharedTerrain, TerrainSnapshot};
