//! # varanno
//!
//! Genomic interval indexing and range-keyed annotation of variant loci.
//!
//! Each member crate is re-exported behind a feature of the same name:
//!
//! - `core`: ranges, locations and contig providers
//! - `overlaprs`: the balanced interval index
//! - `io`: the delimited annotation file reader
//! - `stores`: CNV, segmental duplication and repeat masker stores
//! - `annotate`: rendering store hits into annotation columns
//!
#[cfg(feature = "core")]
#[doc(inline)]
pub use varanno_core as core;

#[cfg(feature = "overlaprs")]
#[doc(inline)]
pub use varanno_overlaprs as overlaprs;

#[cfg(feature = "io")]
#[doc(inline)]
pub use varanno_io as io;

#[cfg(feature = "stores")]
#[doc(inline)]
pub use varanno_stores as stores;

#[cfg(feature = "annotate")]
#[doc(inline)]
pub use varanno_annotate as annotate;
