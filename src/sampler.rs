//! Random sources for terrain generation
//!
//! The generator never touches an RNG directly. It asks a [`SegmentSampler`] for the next
//! candidate segment and for slope run lengths, so tests can script both.

use rand::Rng;

use crate::config::SegmentWeights;
use crate::segment::SegmentType;

/// Cumulative distribution over the segment types.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightTable {
    cumulative: [f64; 5],
}

impl WeightTable {
    pub fn new(weights: &SegmentWeights) -> Self {
        let mut cumulative = weights.as_array();
        for i in 1..cumulative.len() {
            cumulative[i] += cumulative[i - 1];
        }
        Self { cumulative }
    }

    /// Map a uniform draw in [0, 1) to a segment type.
    ///
    /// Picks the first bucket whose cumulative weight is strictly greater than the draw.
    /// Draws past the last bucket (only reachable through rounding) fall back to Ground.
    pub fn pick(&self, draw: f64) -> SegmentType {
        self.cumulative
            .iter()
            .position(|&bound| draw < bound)
            .map(|i| SegmentType::ALL[i])
            .unwrap_or(SegmentType::Ground)
    }
}

/// Source of the random decisions made by the generator.
pub trait SegmentSampler {
    /// Candidate type for a new feature.
    fn sample_segment(&mut self) -> SegmentType;

    /// Slope run length in `1..max_exclusive`. Callers guarantee `max_exclusive >= 2`.
    fn sample_run_length(&mut self, max_exclusive: u32) -> u32;
}

/// Weighted sampler backed by any `rand` RNG.
#[derive(Clone, Debug)]
pub struct WeightedSampler<R> {
    table: WeightTable,
    rng: R,
}

impl<R: Rng> WeightedSampler<R> {
    pub fn new(weights: &SegmentWeights, rng: R) -> Self {
        Self {
            table: WeightTable::new(weights),
            rng,
        }
    }
}

impl<R: Rng> SegmentSampler for WeightedSampler<R> {
    fn sample_segment(&mut self) -> SegmentType {
        let draw: f64 = self.rng.gen();
        self.table.pick(draw)
    }

    fn sample_run_length(&mut self, max_exclusive: u32) -> u32 {
        self.rng.gen_range(1..max_exclusive)
    }
}
