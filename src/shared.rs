//! Thread-shared terrain generator
//!
//! One thread advances, another renders. All access goes through a single mutex and readers copy
//! the whole strip out under it, so a render never observes a half-scrolled strip.

use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::generator::TerrainGenerator;
use crate::sampler::SegmentSampler;
use crate::segment::Segment;

/// Owned copy of the strip plus the layout bounds needed to draw it.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TerrainSnapshot {
    pub segments: Vec<Segment>,
    pub screen_top: i32,
    pub screen_bottom: i32,
    pub ticks: u64,
}

impl TerrainSnapshot {
    pub fn capture<S>(generator: &TerrainGenerator<S>) -> Self {
        Self {
            segments: generator.segments().collect(),
            screen_top: generator.screen_top(),
            screen_bottom: generator.screen_bottom(),
            ticks: generator.ticks(),
        }
    }

    pub fn width(&self) -> usize {
        self.segments.len()
    }
}

pub struct SharedTerrain<S> {
    inner: Arc<Mutex<TerrainGenerator<S>>>,
}

impl<S> Clone for SharedTerrain<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SegmentSampler> SharedTerrain<S> {
    pub fn new(generator: TerrainGenerator<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(generator)),
        }
    }

    pub fn advance(&self) {
        self.lock().advance();
    }

    pub fn initialize(&self) {
        self.lock().initialize();
    }

    pub fn snapshot(&self) -> TerrainSnapshot {
        let guard = self.lock();
        TerrainSnapshot::capture(&*guard)
    }

    // advance/initialize never leave the generator half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, TerrainGenerator<S>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerrainConfig;
    use crate::generator::SeededGenerator;
    use crate::segment::SegmentType;
    use std::thread;

    #[test]
    fn test_snapshot_matches_generator() {
        let shared = SharedTerrain::new(SeededGenerator::seeded(TerrainConfig::default(), 5).unwrap());
        let mut local = SeededGenerator::seeded(TerrainConfig::default(), 5).unwrap();
        for _ in 0..10 {
            shared.advance();
            local.advance();
        }
        let snapshot = shared.snapshot();
        assert_eq!(snapshot.width(), 40);
        assert_eq!(snapshot.ticks, 10);
        assert_eq!(snapshot, TerrainSnapshot::capture(&local));
    }

    #[test]
    fn test_initialize_through_handle() {
        let generator = SeededGenerator::seeded(TerrainConfig::default(), 5).unwrap();
        let shared = SharedTerrain::new(generator);
        shared.advance();
        shared.clone().initialize();
        let snapshot = shared.snapshot();
        assert!(snapshot.segments.iter().all(|s| *s == Segment::ground(5)));
        assert_eq!(snapshot.ticks, 0);
    }

    #[test]
    fn test_concurrent_snapshots_are_consistent() {
        let config = TerrainConfig::default();
        let generator = SeededGenerator::seeded(config.clone(), 99).unwrap();
        let shared = SharedTerrain::new(generator);

        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..5_000 {
                    shared.advance();
                }
            })
        };

        for _ in 0..2_000 {
            let snapshot = shared.snapshot();
            assert_eq!(snapshot.width(), config.screen_width);
            // Cavities and spikes are always followed by ground in any complete strip.
            for pair in snapshot.segments.windows(2) {
                if matches!(pair[0].kind, SegmentType::Cavity | SegmentType::Spike) {
                    assert_eq!(pair[1], Segment::ground(pair[0].height));
                }
            }
        }

        writer.join().unwrap();
        assert_eq!(shared.snapshot().ticks, 5_000);
    }
}
