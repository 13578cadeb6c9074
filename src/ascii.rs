//! ASCII rendering and export for terrain strips
//!
//! Turns a [`TerrainSnapshot`] into a character grid and writes text dumps of it.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chrono::Local;

use crate::segment::SegmentType;
use crate::shared::TerrainSnapshot;

/// Number of text rows needed to draw every column of a strip.
/// The deepest glyph sits two rows below `screen_bottom`.
pub fn grid_rows(snapshot: &TerrainSnapshot) -> usize {
    snapshot.screen_bottom.saturating_add(3).max(0) as usize
}

/// Render the strip as one string per screen row.
pub fn render_rows(snapshot: &TerrainSnapshot) -> Vec<String> {
    let rows = grid_rows(snapshot);
    let mut grid = vec![vec![' '; snapshot.width()]; rows];

    for (x, segment) in snapshot.segments.iter().enumerate() {
        let row = segment.glyph_row();
        if row >= 0 && (row as usize) < rows {
            grid[row as usize][x] = segment.kind.glyph();
        }
    }

    grid.into_iter().map(|row| row.into_iter().collect::<String>()).collect()
}

/// Render the strip as a single block of text.
pub fn render_frame(snapshot: &TerrainSnapshot) -> String {
    render_rows(snapshot).join("\n")
}

/// Column count per segment type, in `SegmentType::ALL` order.
pub fn segment_counts(snapshot: &TerrainSnapshot) -> [usize; 5] {
    let mut counts = [0usize; 5];
    for segment in &snapshot.segments {
        counts[segment.kind.index()] += 1;
    }
    counts
}

pub fn legend() -> String {
    SegmentType::ALL
        .iter()
        .map(|kind| format!("{} {}", kind.glyph(), kind.name()))
        .collect::<Vec<_>>()
        .join("  ")
}

/// Write a frame plus statistics to a text file.
pub fn export_strip_file(path: impl AsRef<Path>, snapshot: &TerrainSnapshot, seed: u64) -> io::Result<()> {
    let mut file = File::create(path)?;
    write_strip_report(&mut file, snapshot, seed)
}

pub fn write_strip_report<W: Write>(out: &mut W, snapshot: &TerrainSnapshot, seed: u64) -> io::Result<()> {
    writeln!(out, "=== RUNNER TERRAIN STRIP ===")?;
    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Width: {}  Rows: {}..={}", snapshot.width(), snapshot.screen_top, snapshot.screen_bottom)?;
    writeln!(out, "Tick: {}", snapshot.ticks)?;
    writeln!(out, "Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out)?;

    writeln!(out, "=== STRIP ===")?;
    for row in render_rows(snapshot) {
        writeln!(out, "{}", row.trim_end())?;
    }
    writeln!(out)?;
    writeln!(out, "{}", legend())?;
    writeln!(out)?;

    writeln!(out, "=== STATISTICS ===")?;
    let total = snapshot.width().max(1);
    let counts = segment_counts(snapshot);
    for kind in SegmentType::ALL {
        let count = counts[kind.index()];
        writeln!(
            out,
            "  {:10} {} {:>4} ({:>5.1}%)",
            kind.name(),
            kind.glyph(),
            count,
            100.0 * count as f64 / total as f64
        )?;
    }
    Ok(())
}
