//! # varanno-annotate
//!
//! Turns annotation stores into output columns for the loci of a variant file.
//!
//! ## Main Components
//!
//! - **`AnnotationSource`**: a loaded store that renders a fixed set of columns per locus and
//!   vets its metadata against the variant file's
//! - **`Annotator`**: the ordered list of sources for one run, usually built from a TOML
//!   [`AnnotationConfig`](config::AnnotationConfig)
//!
//! ## Example
//!
//! ```rust
//! use varanno_annotate::{Annotator, Locus};
//! use varanno_core::models::{ContigProvider, Range};
//!
//! let annotator = Annotator::from_config("../tests/data/annotate/annotate.toml").unwrap();
//! let chr1 = annotator.contigs().chromosome_id("chr1").unwrap();
//!
//! let columns = annotator.columns(&Locus::new(Range::new(chr1, 1900, 1901)));
//! assert_eq!(columns[0], "3");
//! ```
//!
pub mod annotator;
pub mod config;
pub mod error;
pub mod locus;
pub mod sources;

// re-export things
pub use annotator::*;
pub use error::*;
pub use locus::*;
pub use sources::*;
