use std::marker::PhantomData;

use tracing::info;

use varanno_core::models::{ContigProvider, Range};
use varanno_io::{Metadata, Row, RowSource};
use varanno_overlaprs::{Entry, IntervalTree, RangeIntersector};

use crate::error::{Result, StoreError};

///
/// A range-keyed annotation store: one interval index filled from one row source, plus the
/// metadata of that source.
///
/// The store knows nothing about column layouts. Each load is given a binding closure that
/// turns a [`Row`] into a range and a payload, so concrete stores differ only in the closure
/// they supply.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use varanno_core::models::{ChromosomeTable, Range};
/// use varanno_io::DelimitedFile;
/// use varanno_stores::{RangeAnnotationStore, RangeColumns};
///
/// let contigs = ChromosomeTable::from_sizes([("chr1", 10_000)]).unwrap();
/// let text = ">chromosome\tbegin\tend\tcount\nchr1\t100\t500\t2\nchr1\t400\t900\t5\n";
/// let mut source = DelimitedFile::from_reader(Cursor::new(text), "segdup.tsv").unwrap();
///
/// let columns = RangeColumns::explicit(&source, "chromosome", "begin", "end").unwrap();
/// let mut store = RangeAnnotationStore::new();
/// store
///     .load(&mut source, &contigs, |row| {
///         Ok((columns.read(row, &contigs)?, row.parse::<u32>(3)?))
///     })
///     .unwrap();
///
/// assert_eq!(store.intersect(&Range::new(0, 450, 460)).len(), 2);
/// assert_eq!(store.best_overlapping(&Range::new(0, 300, 600)), Some(&2));
/// ```
///
#[derive(Debug, Clone)]
pub struct RangeAnnotationStore<T, I = IntervalTree<T>> {
    pub(crate) index: I,
    pub(crate) metadata: Metadata,
    _payload: PhantomData<T>,
}

impl<T, I: RangeIntersector<T> + Default> Default for RangeAnnotationStore<T, I> {
    fn default() -> Self {
        RangeAnnotationStore {
            index: I::default(),
            metadata: Metadata::default(),
            _payload: PhantomData,
        }
    }
}

impl<T> RangeAnnotationStore<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, I: RangeIntersector<T> + Default> RangeAnnotationStore<T, I> {
    ///
    /// Load every row of `source` into the store, replacing anything loaded before.
    ///
    /// Each row is handed to `bind`, and the range it returns is checked against the contig
    /// provider before it is inserted. On any failure the store is left empty.
    ///
    /// # Arguments
    /// - source: rows and metadata to load
    /// - contigs: chromosome bounds used to validate each range
    /// - bind: reads the range and payload out of one row
    pub fn load<S, C, F>(&mut self, source: &mut S, contigs: &C, mut bind: F) -> Result<()>
    where
        S: RowSource + ?Sized,
        C: ContigProvider + ?Sized,
        F: FnMut(&Row<'_>) -> Result<(Range, T)>,
    {
        self.clear();
        let result = self.load_rows(source, contigs, &mut bind);
        if result.is_err() {
            self.clear();
        }
        result
    }

    fn load_rows<S, C, F>(&mut self, source: &mut S, contigs: &C, bind: &mut F) -> Result<()>
    where
        S: RowSource + ?Sized,
        C: ContigProvider + ?Sized,
        F: FnMut(&Row<'_>) -> Result<(Range, T)>,
    {
        self.metadata = source.metadata().clone();

        while let Some(row) = source.next_row()? {
            let (range, payload) = bind(&row)?;
            check_bounds(&row, &range, contigs)?;
            self.index.put(range, payload);
        }

        info!(
            file = self.metadata.file_name(),
            records = self.index.len(),
            "loaded annotation store"
        );
        Ok(())
    }

    /// Every entry whose range intersects `range`, in no particular order.
    pub fn intersect(&self, range: &Range) -> Vec<&Entry<T>> {
        self.index.intersect(range)
    }

    ///
    /// The payload of the entry that overlaps `range` the most.
    ///
    /// Ties go to the entry whose range sorts lowest, so `[10,20)` beats `[12,22)` for the
    /// query `[15,17)`. Returns `None` when nothing intersects.
    pub fn best_overlapping(&self, range: &Range) -> Option<&T> {
        let mut best: Option<(&Entry<T>, i64)> = None;
        for entry in self.index.intersect(range) {
            let Some(overlap) = range.overlap_length(entry.range()) else {
                continue;
            };
            let better = match best {
                None => true,
                Some((current, longest)) => {
                    overlap > longest || (overlap == longest && entry.range() < current.range())
                }
            };
            if better {
                best = Some((entry, overlap));
            }
        }
        best.map(|(entry, _)| entry.payload())
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn index(&self) -> &I {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Drop every entry and the metadata.
    pub fn clear(&mut self) {
        self.index.clear();
        self.metadata = Metadata::default();
    }
}

fn check_bounds<C: ContigProvider + ?Sized>(row: &Row<'_>, range: &Range, contigs: &C) -> Result<()> {
    let bounds = contigs.chromosome_range(range.chromosome);
    if let Some(bounds) = bounds {
        if range.begin >= bounds.begin && range.end <= bounds.end {
            return Ok(());
        }
    }

    Err(StoreError::RangeOutOfBounds {
        file: row.file_name().to_string(),
        line: row.line_number(),
        chromosome: contigs
            .chromosome_name(range.chromosome)
            .unwrap_or("?")
            .to_string(),
        range: *range,
        length: bounds.map_or(0, |bounds| bounds.end),
    })
}
