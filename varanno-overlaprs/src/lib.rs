//! Interval indexing for genomic ranges.
//!
//! The main structure is [`IntervalTree`], a balanced, augmented binary search tree keyed by
//! [`Range`](varanno_core::models::Range) that stores a payload per range and answers
//! "which stored ranges intersect this one" queries. Ranges may be inserted in any order,
//! including sorted or fully duplicated input, without the tree degenerating.
//!
//! ## Quick Start
//!
//! ```rust
//! use varanno_core::models::Range;
//! use varanno_overlaprs::IntervalTree;
//!
//! // chromosome ids come from a contig provider; 0 here stands for chr1
//! let mut tree = IntervalTree::new();
//! tree.put(Range::new(0, 1000, 2000), "BRCA1");
//! tree.put(Range::new(0, 3000, 4000), "TP53");
//! tree.put(Range::new(1, 5000, 6000), "EGFR");
//!
//! let genes: Vec<&str> = tree
//!     .intersect_iter(&Range::new(0, 1500, 3500))
//!     .map(|entry| *entry.payload())
//!     .collect();
//! assert_eq!(genes.len(), 2);
//! ```

/// Balanced augmented interval tree.
///
/// See [`IntervalTree`] for details.
pub mod interval_tree;

/// Brute-force reference implementation.
pub mod linear;

/// Core traits for overlap operations.
///
/// See [`RangeIntersector`] for the main trait.
pub mod traits;

// re-exports
pub use self::interval_tree::{Entry, IntervalTree, IterIntersect};
pub use self::linear::LinearIntersector;
pub use self::traits::RangeIntersector;
