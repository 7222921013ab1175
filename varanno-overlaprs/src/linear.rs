use varanno_core::models::Range;

use crate::{Entry, RangeIntersector};

/// A flat list of entries answering queries by scanning every entry.
///
/// Only worth using for a handful of ranges; its main job is to serve as the reference
/// answer when checking [`IntervalTree`](crate::IntervalTree) results.
#[derive(Debug, Clone)]
pub struct LinearIntersector<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for LinearIntersector<T> {
    fn default() -> Self {
        LinearIntersector {
            entries: Vec::new(),
        }
    }
}

impl<T> LinearIntersector<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> RangeIntersector<T> for LinearIntersector<T> {
    fn put(&mut self, range: Range, payload: T) {
        self.entries.push(Entry::new(range, payload));
    }

    fn intersect(&self, query: &Range) -> Vec<&Entry<T>> {
        self.entries
            .iter()
            .filter(|entry| entry.range().intersects(query))
            .collect()
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    /// Every entry is visited on every query.
    fn max_depth(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_linear_scan() {
        let mut linear = LinearIntersector::new();
        linear.put(Range::new(0, 10, 20), "a");
        linear.put(Range::new(0, 30, 40), "b");
        linear.put(Range::new(1, 10, 20), "c");

        let hits: Vec<&str> = linear
            .intersect(&Range::new(0, 15, 35))
            .into_iter()
            .map(|e| *e.payload())
            .collect();
        assert_eq!(hits, vec!["a", "b"]);

        linear.clear();
        assert!(linear.is_empty());
    }
}
