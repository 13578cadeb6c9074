//! Terrain segment types
//!
//! A segment is one column of terrain: a type plus the screen row (height) it sits on.
//! Heights grow downward, so a SlopeUp column is one row *smaller* than the one before it.

use serde::{Deserialize, Serialize};

/// Kind of terrain occupying a single column.
///
/// Declaration order matches the order of the sampling weights.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentType {
    #[default]
    Ground,
    Cavity,
    SlopeUp,
    SlopeDown,
    Spike,
}

impl SegmentType {
    /// All segment types in weight order.
    pub const ALL: [SegmentType; 5] = [
        SegmentType::Ground,
        SegmentType::Cavity,
        SegmentType::SlopeUp,
        SegmentType::SlopeDown,
        SegmentType::Spike,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SegmentType::Ground => "Ground",
            SegmentType::Cavity => "Cavity",
            SegmentType::SlopeUp => "SlopeUp",
            SegmentType::SlopeDown => "SlopeDown",
            SegmentType::Spike => "Spike",
        }
    }

    /// Position in the weight vector.
    pub fn index(&self) -> usize {
        match self {
            SegmentType::Ground => 0,
            SegmentType::Cavity => 1,
            SegmentType::SlopeUp => 2,
            SegmentType::SlopeDown => 3,
            SegmentType::Spike => 4,
        }
    }

    pub fn is_slope(&self) -> bool {
        matches!(self, SegmentType::SlopeUp | SegmentType::SlopeDown)
    }

    /// Character drawn for this segment.
    pub fn glyph(&self) -> char {
        match self {
            SegmentType::Ground | SegmentType::Cavity => '_',
            SegmentType::SlopeUp => '/',
            SegmentType::SlopeDown => '\\',
            SegmentType::Spike => '.',
        }
    }

    /// Rows below the segment height where the glyph is drawn.
    /// Cavities sink one row into the ground; rising slopes sit on the lower edge.
    pub fn row_offset(&self) -> i32 {
        match self {
            SegmentType::Cavity | SegmentType::SlopeUp => 2,
            SegmentType::Ground | SegmentType::SlopeDown | SegmentType::Spike => 1,
        }
    }
}

/// One column of the terrain strip.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub kind: SegmentType,
    pub height: i32,
}

impl Segment {
    pub fn new(kind: SegmentType, height: i32) -> Self {
        Self { kind, height }
    }

    pub fn ground(height: i32) -> Self {
        Self::new(SegmentType::Ground, height)
    }

    /// Screen row the glyph for this column lands on.
    pub fn glyph_row(&self) -> i32 {
        self.height + self.kind.row_offset()
    }
}
