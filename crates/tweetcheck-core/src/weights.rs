//! Per-codepoint weight table.
//!
//! Each character of a post costs a number of weight units. Common scripts
//! (Latin, Greek, Cyrillic, Hebrew, Arabic, ...) and general punctuation cost
//! the in-range weight; everything else, CJK and emoji included, costs the
//! larger default weight. Dividing the summed weight by [`WeightTable::scale`]
//! yields a length in character units.

use serde::Serialize;

/// A contiguous, inclusive range of codepoints sharing a weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeightRange {
    /// First codepoint in the range.
    pub start: u32,
    /// Last codepoint in the range (inclusive).
    pub end: u32,
    /// Weight charged for each codepoint in the range.
    pub weight: usize,
}

impl WeightRange {
    /// Create a new range.
    pub const fn new(start: u32, end: u32, weight: usize) -> Self {
        Self { start, end, weight }
    }

    /// Whether `c` falls inside this range.
    pub const fn contains(&self, c: char) -> bool {
        let cp = c as u32;
        self.start <= cp && cp <= self.end
    }
}

/// An ordered table of disjoint weight ranges.
///
/// Lookups scan the ranges in table order and the first hit wins. Codepoints
/// outside every range cost [`default_weight`](Self::default_weight).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeightTable {
    /// Divisor that turns summed weights into character units.
    pub scale: usize,
    /// Weight for codepoints not covered by any range.
    pub default_weight: usize,
    /// Ranges in lookup order.
    pub ranges: &'static [WeightRange],
}

const DEFAULT_RANGES: &[WeightRange] = &[
    // Latin through Georgian
    WeightRange::new(0x0000, 0x10FF, 100),
    // spaces and zero-width joiners
    WeightRange::new(0x2000, 0x200D, 100),
    // dashes and quotation marks
    WeightRange::new(0x2010, 0x201F, 100),
    // primes
    WeightRange::new(0x2032, 0x2037, 100),
];

/// The weight table of the current platform rules.
pub static DEFAULT_WEIGHTS: WeightTable = WeightTable {
    scale: 100,
    default_weight: 200,
    ranges: DEFAULT_RANGES,
};

impl WeightTable {
    /// Weight of a single character.
    pub fn weight_of(&self, c: char) -> usize {
        self.ranges
            .iter()
            .find(|range| range.contains(c))
            .map_or(self.default_weight, |range| range.weight)
    }

    /// Sum of the weights of every character in `text`, before scaling.
    ///
    /// No normalization happens here; callers pass already-canonical text.
    pub fn raw_weight(&self, text: &str) -> usize {
        text.chars().map(|c| self.weight_of(c)).sum()
    }
}

impl Default for WeightTable {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_costs_the_in_range_weight() {
        assert_eq!(DEFAULT_WEIGHTS.weight_of('a'), 100);
        assert_eq!(DEFAULT_WEIGHTS.weight_of('\0'), 100);
        assert_eq!(DEFAULT_WEIGHTS.weight_of('\u{10FF}'), 100);
    }

    #[test]
    fn unlisted_codepoints_cost_the_default() {
        assert_eq!(DEFAULT_WEIGHTS.weight_of('\u{1100}'), 200);
        assert_eq!(DEFAULT_WEIGHTS.weight_of('日'), 200);
        assert_eq!(DEFAULT_WEIGHTS.weight_of('😀'), 200);
        assert_eq!(DEFAULT_WEIGHTS.weight_of('\u{200E}'), 200);
    }

    #[test]
    fn punctuation_ranges_are_inclusive() {
        assert_eq!(DEFAULT_WEIGHTS.weight_of('\u{2000}'), 100);
        assert_eq!(DEFAULT_WEIGHTS.weight_of('\u{200D}'), 100);
        assert_eq!(DEFAULT_WEIGHTS.weight_of('\u{2010}'), 100);
        assert_eq!(DEFAULT_WEIGHTS.weight_of('\u{201F}'), 100);
        assert_eq!(DEFAULT_WEIGHTS.weight_of('\u{2020}'), 200);
        assert_eq!(DEFAULT_WEIGHTS.weight_of('\u{2032}'), 100);
        assert_eq!(DEFAULT_WEIGHTS.weight_of('\u{2037}'), 100);
        assert_eq!(DEFAULT_WEIGHTS.weight_of('\u{2038}'), 200);
    }

    #[test]
    fn first_matching_range_wins() {
        static OVERLAPPING: &[WeightRange] =
            &[WeightRange::new(0x61, 0x7A, 1), WeightRange::new(0x61, 0x61, 7)];
        let table = WeightTable {
            scale: 1,
            default_weight: 9,
            ranges: OVERLAPPING,
        };
        assert_eq!(table.weight_of('a'), 1);
        assert_eq!(table.weight_of('A'), 9);
    }

    #[test]
    fn raw_weight_sums_characters() {
        assert_eq!(DEFAULT_WEIGHTS.raw_weight(""), 0);
        assert_eq!(DEFAULT_WEIGHTS.raw_weight("ab"), 200);
        assert_eq!(DEFAULT_WEIGHTS.raw_weight("a日"), 300);
    }

    #[test]
    fn default_table_ranges_are_ordered_and_disjoint() {
        for pair in DEFAULT_WEIGHTS.ranges.windows(2) {
            assert!(pair[0].start <= pair[0].end);
            assert!(pair[0].end < pair[1].start);
        }
    }
}
