//! # Reading delimited annotation files.
//!
//! Annotation sources ship as tab-delimited text: a block of `#KEY<TAB>VALUE` metadata lines,
//! a `>`-prefixed header naming the columns, then one row per record. This crate reads that
//! format into [`Metadata`] and a stream of typed [`Row`]s behind the [`RowSource`] trait.
//!
//! ```rust
//! use std::io::Cursor;
//! use varanno_io::{DelimitedFile, RowSource};
//!
//! let text = "#GENOME_REFERENCE\tNCBI build 37\n>chromosome\tbegin\tend\tcount\nchr1\t100\t200\t3\n";
//! let mut file = DelimitedFile::from_reader(Cursor::new(text), "segdup.tsv").unwrap();
//!
//! assert_eq!(file.metadata().get("GENOME_REFERENCE"), Some("NCBI build 37"));
//! let count = file.require_field("count").unwrap();
//! let row = file.next_row().unwrap().unwrap();
//! assert_eq!(row.parse::<u32>(count).unwrap(), 3);
//! ```
//!
pub mod delimited;
pub mod error;
pub mod metadata;

// re-expose core types
pub use delimited::*;
pub use error::*;
pub use metadata::*;
