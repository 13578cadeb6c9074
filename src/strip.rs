//! Fixed-length scrolling strip of terrain columns.
//!
//! Backed by a circular buffer: pushing a column overwrites the oldest slot and moves the head,
//! so scrolling costs O(1) regardless of width.

use crate::segment::Segment;

#[derive(Clone, Debug)]
pub struct TerrainStrip {
    cells: Vec<Segment>,
    /// Slot holding the oldest (leftmost) column
    head: usize,
}

impl TerrainStrip {
    /// Strip of `width` copies of `value`. `width` must be non-zero.
    pub fn new_with(width: usize, value: Segment) -> Self {
        debug_assert!(width > 0, "terrain strip needs at least one column");
        Self {
            cells: vec![value; width],
            head: 0,
        }
    }

    /// Overwrite every column and reset the scroll position.
    pub fn fill(&mut self, value: Segment) {
        self.cells.fill(value);
        self.head = 0;
    }

    /// Column at `index`, counted from the oldest (0) to the newest (`width - 1`).
    pub fn get(&self, index: usize) -> Option<Segment> {
        if index >= self.cells.len() {
            return None;
        }
        Some(self.cells[(self.head + index) % self.cells.len()])
    }

    /// Drop the oldest column and append `value` as the newest.
    pub fn push(&mut self, value: Segment) {
        self.cells[self.head] = value;
        self.head = (self.head + 1) % self.cells.len();
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = Segment> + '_ {
        let (newer, older) = self.cells.split_at(self.head);
        older.iter().chain(newer.iter()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::SegmentType;

    fn heights(strip: &TerrainStrip) -> Vec<i32> {
        strip.iter().map(|s| s.height).collect()
    }

    #[test]
    fn test_push_scrolls_left() {
        let mut strip = TerrainStrip::new_with(4, Segment::ground(5));
        strip.push(Segment::ground(4));
        strip.push(Segment::ground(3));
        assert_eq!(heights(&strip), vec![5, 5, 4, 3]);
        assert_eq!(strip.get(3), Some(Segment::ground(3)));
        assert_eq!(strip.iter().count(), 4);
    }

    #[test]
    fn test_wraps_past_capacity() {
        let mut strip = TerrainStrip::new_with(3, Segment::ground(0));
        for h in 1..=7 {
            strip.push(Segment::ground(h));
        }
        assert_eq!(heights(&strip), vec![5, 6, 7]);
        assert_eq!(strip.get(0), Some(Segment::ground(5)));
        assert_eq!(strip.get(2), Some(Segment::ground(7)));
        assert_eq!(strip.get(3), None);
    }

    #[test]
    fn test_fill_resets_head() {
        let mut strip = TerrainStrip::new_with(3, Segment::ground(2));
        strip.push(Segment::new(SegmentType::Spike, 2));
        strip.fill(Segment::ground(4));
        assert_eq!(strip.iter().collect::<Vec<_>>(), vec![Segment::ground(4); 3]);
        strip.push(Segment::ground(1));
        assert_eq!(heights(&strip), vec![4, 4, 1]);
    }

    #[test]
    fn test_single_column() {
        let mut strip = TerrainStrip::new_with(1, Segment::ground(1));
        strip.push(Segment::new(SegmentType::Cavity, 1));
        assert_eq!(strip.iter().collect::<Vec<_>>(), vec![Segment::new(SegmentType::Cavity, 1)]);
        assert_eq!(strip.get(1), None);
    }
}
