use varanno_core::models::Range;

use crate::Entry;

/// Insertion and overlap queries over ranges carrying a payload.
pub trait RangeIntersector<T> {
    fn put(&mut self, range: Range, payload: T);

    /// Every stored entry whose range intersects `query`, in no particular order.
    fn intersect(&self, query: &Range) -> Vec<&Entry<T>>;

    fn clear(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth of the underlying structure, for balance checks.
    fn max_depth(&self) -> usize;
}
