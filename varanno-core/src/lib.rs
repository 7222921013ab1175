//! Core models shared by the varanno crates: genomic [`Range`](models::Range)s and
//! [`Location`](models::Location)s, and the [`ContigProvider`](models::ContigProvider)
//! abstraction that maps chromosome names to ids and bounds.
pub mod errors;
pub mod models;
pub mod utils;
