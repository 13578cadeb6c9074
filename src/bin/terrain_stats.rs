//! Long-run statistics for the terrain generator
//! Advances a seeded generator many ticks and reports how often each segment type was emitted,
//! alongside the slope run lengths and height range observed.

use std::time::Instant;

use runner_terrain::config::TerrainConfig;
use runner_terrain::generator::SeededGenerator;
use runner_terrain::segment::SegmentType;

const TICKS: u64 = 1_000_000;
const SEED: u64 = 1337;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut generator = SeededGenerator::seeded(TerrainConfig::default(), SEED)?;
    let config = generator.config().clone();

    println!("=== Terrain Statistics ===");
    println!("Seed: {}  Ticks: {}", SEED, TICKS);
    println!();

    let mut counts = [0u64; 5];
    let mut height_hist = vec![0u64; (config.screen_bottom - config.screen_top + 1) as usize];
    let mut slope_columns = 0u64;
    let mut slope_runs = 0u64;
    let mut prev = SegmentType::Ground;

    let start = Instant::now();
    for _ in 0..TICKS {
        generator.advance();
        let kind = generator.last_segment();
        counts[kind.index()] += 1;
        height_hist[(generator.last_height() - config.screen_top) as usize] += 1;

        if kind.is_slope() {
            slope_columns += 1;
            if prev != kind {
                slope_runs += 1;
            }
        }
        prev = kind;
    }
    println!("Generation: {:?}", start.elapsed());
    println!();

    println!("Segment frequencies (observed vs weight):");
    for kind in SegmentType::ALL {
        let observed = counts[kind.index()] as f64 / TICKS as f64;
        println!(
            "  {:10} {:>8} {:>6.2}%  (weight {:>5.1}%)",
            kind.name(),
            counts[kind.index()],
            observed * 100.0,
            config.weights.get(kind) * 100.0
        );
    }
    println!();

    if slope_runs > 0 {
        println!("Mean slope length: {:.2} columns over {} runs", slope_columns as f64 / slope_runs as f64, slope_runs);
    }

    println!("Height distribution:");
    for (i, count) in height_hist.iter().enumerate() {
        println!("  row {:>2}: {:>6.2}%", config.screen_top + i as i32, *count as f64 * 100.0 / TICKS as f64);
    }
    Ok(())
}
