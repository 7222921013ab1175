use std::path::Path;

use varanno_core::models::{ContigProvider, Range};
use varanno_io::{DelimitedFile, Metadata, RowSource};
use varanno_overlaprs::Entry;

use crate::binding::RangeColumns;
use crate::error::Result;
use crate::store::RangeAnnotationStore;

/// A segmental duplication and the number of other copies it overlaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegDupData {
    pub count: u32,
}

/// Segmental duplications, from a file with `chromosome`, `begin`, `end` and `count` columns.
#[derive(Debug, Clone)]
pub struct SegDupStore {
    store: RangeAnnotationStore<SegDupData>,
}

impl SegDupStore {
    pub fn open<P: AsRef<Path>, C: ContigProvider + ?Sized>(path: P, contigs: &C) -> Result<Self> {
        let mut source = DelimitedFile::from_path(path)?;
        Self::from_source(&mut source, contigs)
    }

    pub fn from_source<S, C>(source: &mut S, contigs: &C) -> Result<Self>
    where
        S: RowSource + ?Sized,
        C: ContigProvider + ?Sized,
    {
        let range = RangeColumns::explicit(&*source, "chromosome", "begin", "end")?;
        let count = source.require_field("count")?;

        let mut store = RangeAnnotationStore::new();
        store.load(source, contigs, |row| {
            Ok((
                range.read(row, contigs)?,
                SegDupData {
                    count: row.parse(count)?,
                },
            ))
        })?;
        Ok(SegDupStore { store })
    }

    pub fn metadata(&self) -> &Metadata {
        self.store.metadata()
    }

    pub fn intersect(&self, range: &Range) -> Vec<&Entry<SegDupData>> {
        self.store.intersect(range)
    }

    pub fn best_overlapping(&self, range: &Range) -> Option<&SegDupData> {
        self.store.best_overlapping(range)
    }

    pub fn store(&self) -> &RangeAnnotationStore<SegDupData> {
        &self.store
    }
}
