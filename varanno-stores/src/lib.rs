//! # Range-keyed annotation stores.
//!
//! Each store loads one delimited annotation source into a
//! [`IntervalTree`](varanno_overlaprs::IntervalTree) and answers overlap queries against it.
//! [`RangeAnnotationStore`] is the generic part: it is filled through a binding closure that
//! reads a range and a payload out of each row, and picks the best overlapping record for a
//! query. The concrete stores only differ in the columns they bind:
//!
//! - [`CnvDetailStore`]: CNV detail windows, explicit or rebuilt from midpoints
//! - [`CnvSegmentStore`]: called CNV segments
//! - [`SegDupStore`]: segmental duplications
//! - [`RepeatMaskerStore`]: RepeatMasker hits
//!
//! ```rust
//! use varanno_core::models::{ChromosomeTable, ContigProvider, Range};
//! use varanno_stores::CnvDetailStore;
//!
//! let contigs = ChromosomeTable::from_chrom_sizes("../tests/data/stores/chrom.sizes").unwrap();
//! let store = CnvDetailStore::open("../tests/data/stores/cnvDetails.tsv", &contigs).unwrap();
//!
//! let chr1 = contigs.chromosome_id("chr1").unwrap();
//! let detail = store.best_overlapping_detail(&Range::new(chr1, 6200, 6300)).unwrap();
//! assert_eq!(detail.called_ploidy, "3");
//! ```
//!
pub mod binding;
pub mod cnv;
pub mod error;
pub mod repmask;
pub mod segdup;
pub mod store;
pub mod tiling;

// re-exports
pub use binding::{LafColumns, LafFamily, RangeColumns};
pub use cnv::{CnvData, CnvDetailStore, CnvSegmentStore, NO_COVERAGE};
pub use error::{Result, StoreError};
pub use repmask::{RepeatMaskerData, RepeatMaskerStore};
pub use segdup::{SegDupData, SegDupStore};
pub use store::RangeAnnotationStore;
pub use tiling::midpoint_window;
