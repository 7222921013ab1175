use std::cmp::{max, min};
use std::fmt::{self, Display};

/// Numeric chromosome identifier, as assigned by a [`ContigProvider`](crate::models::ContigProvider).
pub type ChromosomeId = u16;

///
/// A single position on a chromosome.
///
/// Ordered by chromosome first, then offset.
///
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub chromosome: ChromosomeId,
    pub offset: u32,
}

impl Location {
    pub fn new(chromosome: ChromosomeId, offset: u32) -> Self {
        Location { chromosome, offset }
    }
}

///
/// Represent a range on one chromosome from [begin, end).
/// Inclusive begin, exclusive of end.
///
/// The derived ordering is lexicographic on `(chromosome, begin, end)`, which is the key
/// order of the interval index and the tie-break order of best-overlap selection.
///
#[derive(Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub chromosome: ChromosomeId,
    pub begin: u32,
    pub end: u32,
}

impl Range {
    pub fn new(chromosome: ChromosomeId, begin: u32, end: u32) -> Self {
        debug_assert!(begin <= end, "range begin {begin} is past its end {end}");
        Range {
            chromosome,
            begin,
            end,
        }
    }

    ///
    /// Get length of the range
    ///
    #[inline]
    pub fn length(&self) -> u32 {
        self.end - self.begin
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Check if two ranges overlap
    #[inline]
    pub fn intersects(&self, other: &Range) -> bool {
        self.chromosome == other.chromosome && self.begin < other.end && other.begin < self.end
    }

    /// Compute the overlap length between two ranges, or `None` when they don't intersect.
    #[inline]
    pub fn overlap_length(&self, other: &Range) -> Option<i64> {
        if !self.intersects(other) {
            return None;
        }
        Some(i64::from(min(self.end, other.end)) - i64::from(max(self.begin, other.begin)))
    }

    /// The range covered by both `self` and `other`, if they intersect.
    pub fn overlapping_range(&self, other: &Range) -> Option<Range> {
        if !self.intersects(other) {
            return None;
        }
        Some(Range {
            chromosome: self.chromosome,
            begin: max(self.begin, other.begin),
            end: min(self.end, other.end),
        })
    }

    /// The first position of the range.
    #[inline]
    pub fn begin_location(&self) -> Location {
        Location::new(self.chromosome, self.begin)
    }

    /// The boundary of the range, used as the augmented value of the interval index.
    #[inline]
    pub fn end_location(&self) -> Location {
        Location::new(self.chromosome, self.end)
    }
}

impl Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.begin, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Range::new(0, 0, 10), Range::new(0, 5, 15), true)]
    #[case(Range::new(0, 0, 10), Range::new(0, 10, 20), false)]
    #[case(Range::new(0, 0, 10), Range::new(1, 0, 10), false)]
    #[case(Range::new(0, 5, 5), Range::new(0, 0, 10), true)]
    #[case(Range::new(0, 10, 10), Range::new(0, 0, 10), false)]
    fn test_intersects(#[case] a: Range, #[case] b: Range, #[case] expected: bool) {
        assert_eq!(a.intersects(&b), expected);
        assert_eq!(b.intersects(&a), expected);
    }

    #[rstest]
    fn test_overlap_length() {
        let query = Range::new(0, 15, 17);
        assert_eq!(query.overlap_length(&Range::new(0, 10, 20)), Some(2));
        assert_eq!(query.overlap_length(&Range::new(0, 16, 40)), Some(1));
        assert_eq!(query.overlap_length(&Range::new(0, 17, 40)), None);
    }

    #[rstest]
    fn test_ordering_is_lexicographic() {
        let mut ranges = vec![
            Range::new(1, 0, 5),
            Range::new(0, 12, 22),
            Range::new(0, 10, 20),
            Range::new(0, 10, 15),
        ];
        ranges.sort();
        assert_eq!(
            ranges,
            vec![
                Range::new(0, 10, 15),
                Range::new(0, 10, 20),
                Range::new(0, 12, 22),
                Range::new(1, 0, 5),
            ]
        );
    }

    #[rstest]
    fn test_overlapping_range() {
        let a = Range::new(2, 100, 200);
        let b = Range::new(2, 150, 300);
        assert_eq!(a.overlapping_range(&b), Some(Range::new(2, 150, 200)));
        assert_eq!(a.overlapping_range(&Range::new(3, 150, 300)), None);
    }
}
