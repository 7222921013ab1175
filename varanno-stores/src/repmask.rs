use std::path::Path;

use varanno_core::models::{ContigProvider, Range};
use varanno_io::{DelimitedFile, Metadata, RowSource};
use varanno_overlaprs::Entry;

use crate::binding::RangeColumns;
use crate::error::Result;
use crate::store::RangeAnnotationStore;

/// A RepeatMasker hit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepeatMaskerData {
    pub name: String,
    pub family: String,
    /// Percent divergence of the hit from the repeat consensus.
    pub divergence: f64,
    pub strand: String,
}

/// RepeatMasker hits, from a file with `chromosome`, `begin`, `end`, `repName`, `repFamily`,
/// `divergence` and `strand` columns.
#[derive(Debug, Clone)]
pub struct RepeatMaskerStore {
    store: RangeAnnotationStore<RepeatMaskerData>,
}

impl RepeatMaskerStore {
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
        let name = source.require_field("repName")?;
        let family = source.require_field("repFamily")?;
        let divergence = source.require_field("divergence")?;
        let strand = source.require_field("strand")?;

        let mut store = RangeAnnotationStore::new();
        store.load(source, contigs, |row| {
            let data = RepeatMaskerData {
                name: row.get_str(name)?.to_string(),
                family: row.get_str(family)?.to_string(),
                divergence: row.parse(divergence)?,
                strand: row.get_str(strand)?.to_string(),
            };
            Ok((range.read(row, contigs)?, data))
        })?;
        Ok(RepeatMaskerStore { store })
    }

    pub fn metadata(&self) -> &Metadata {
        self.store.metadata()
    }

    pub fn intersect(&self, range: &Range) -> Vec<&Entry<RepeatMaskerData>> {
        self.store.intersect(range)
    }

    pub fn best_overlapping(&self, range: &Range) -> Option<&RepeatMaskerData> {
        self.store.best_overlapping(range)
    }

    pub fn store(&self) -> &RangeAnnotationStore<RepeatMaskerData> {
        &self.store
    }
}
