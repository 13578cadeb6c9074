//! Endless-runner terrain generator
//!
//! Keeps a scrolling strip of `screen_width` columns. Each `advance` drops the oldest column and
//! appends a new one chosen by a small state machine:
//!
//! 1. An active slope run continues with the same slope type, one row per column.
//! 2. After a Ground column a new feature is sampled from the weight table.
//! 3. Anything else (a Cavity, a Spike, or a slope run that just finished) is followed by Ground.
//!
//! Rule 3 keeps special features one column wide and guarantees rule 2 only ever fires after
//! Ground.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::config::TerrainConfig;
use crate::error::ConfigError;
use crate::sampler::{SegmentSampler, WeightedSampler};
use crate::segment::{Segment, SegmentType};
use crate::strip::TerrainStrip;

/// Generator seeded from a `ChaCha8Rng`
pub type SeededGenerator = TerrainGenerator<WeightedSampler<ChaCha8Rng>>;

pub struct TerrainGenerator<S> {
    config: TerrainConfig,
    sampler: S,
    strip: TerrainStrip,
    last_segment: SegmentType,
    last_height: i32,
    /// Forced continuation columns left in the current slope
    slope_run_remaining: u32,
    ticks: u64,
}

impl SeededGenerator {
    /// Generator using the configured weights and a deterministic RNG.
    pub fn seeded(config: TerrainConfig, seed: u64) -> Result<Self, ConfigError> {
        let sampler = WeightedSampler::new(&config.weights, ChaCha8Rng::seed_from_u64(seed));
        Self::new(config, sampler)
    }
}

impl<S: SegmentSampler> TerrainGenerator<S> {
    /// Validate `config` and build a generator holding a flat starting strip.
    pub fn new(config: TerrainConfig, sampler: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let start = Segment::ground(config.ground_start);
        let strip = TerrainStrip::new_with(config.screen_width, start);
        let mut generator = Self {
            config,
            sampler,
            strip,
            last_segment: SegmentType::Ground,
            last_height: start.height,
            slope_run_remaining: 0,
            ticks: 0,
        };
        generator.initialize();
        Ok(generator)
    }

    /// Reset to a flat strip of Ground at `ground_start`.
    pub fn initialize(&mut self) {
        let start = Segment::ground(self.config.ground_start);
        self.strip.fill(start);
        self.last_segment = start.kind;
        self.last_height = start.height;
        self.slope_run_remaining = 0;
        self.ticks = 0;
    }

    /// Scroll the strip one column, generating the new rightmost column.
    pub fn advance(&mut self) {
        let next = self.next_segment();

        self.strip.push(next);
        self.last_segment = next.kind;
        self.last_height = next.height;
        self.ticks += 1;

        trace!(
            tick = self.ticks,
            kind = next.kind.name(),
            height = next.height,
            run = self.slope_run_remaining,
            "advanced terrain"
        );
    }

    fn next_segment(&mut self) -> Segment {
        if self.slope_run_remaining > 0 {
            self.slope_run_remaining -= 1;
            let step = if self.last_segment == SegmentType::SlopeUp { -1 } else { 1 };
            let height = self.config.clamp_height(self.last_height.saturating_add(step));
            return Segment::new(self.last_segment, height);
        }

        if self.last_segment != SegmentType::Ground {
            return Segment::ground(self.last_height);
        }

        let candidate = self.sampler.sample_segment();
        self.resolve_candidate(candidate)
    }

    fn resolve_candidate(&mut self, candidate: SegmentType) -> Segment {
        let top = self.config.screen_top;
        let bottom = self.config.screen_bottom;
        let height = self.last_height;

        match candidate {
            SegmentType::Cavity | SegmentType::Spike => Segment::new(candidate, height),

            SegmentType::SlopeUp if height > top => {
                let new_height = height.saturating_sub(1).max(top);
                self.slope_run_remaining = if new_height > top { self.sample_run() } else { 0 };
                debug!(height = new_height, run = self.slope_run_remaining, "slope up started");
                Segment::new(candidate, new_height)
            }

            SegmentType::SlopeDown if height < bottom => {
                let new_height = height.saturating_add(1).min(bottom);
                self.slope_run_remaining = if new_height < bottom { self.sample_run() } else { 0 };
                debug!(height = new_height, run = self.slope_run_remaining, "slope down started");
                Segment::new(candidate, new_height)
            }

            SegmentType::SlopeUp | SegmentType::SlopeDown => {
                debug!(kind = candidate.name(), height, "no room for slope, placing ground");
                Segment::ground(height)
            }

            SegmentType::Ground => Segment::ground(height),
        }
    }

    fn sample_run(&mut self) -> u32 {
        self.sampler.sample_run_length(self.config.max_slope_run_length)
    }
}

impl<S> TerrainGenerator<S> {
    /// Column at `index` (0 = oldest), or `None` past the strip width.
    pub fn segment_at(&self, index: usize) -> Option<Segment> {
        self.strip.get(index)
    }

    /// All columns, oldest first.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.strip.iter()
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn screen_width(&self) -> usize {
        self.config.screen_width
    }

    pub fn screen_top(&self) -> i32 {
        self.config.screen_top
    }

    pub fn screen_bottom(&self) -> i32 {
        self.config.screen_bottom
    }

    pub fn last_segment(&self) -> SegmentType {
        self.last_segment
    }

    pub fn last_height(&self) -> i32 {
        self.last_height
    }

    pub fn slope_run_remaining(&self) -> u32 {
        self.slope_run_remaining
    }

    /// Advances since the last reset
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
