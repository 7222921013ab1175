pub mod contig;
pub mod range;

// re-export for cleaner imports
pub use self::contig::{ChromosomeTable, ContigProvider};
pub use self::range::{ChromosomeId, Location, Range};
