use std::path::Path;

use varanno_core::models::{ContigProvider, Range};
use varanno_io::{DelimitedFile, Metadata, Row, RowSource};
use varanno_overlaprs::Entry;

use crate::binding::{LafColumns, LafFamily, RangeColumns};
use crate::error::{Result, StoreError};
use crate::store::RangeAnnotationStore;

/// Relative coverage written as `N` in the source, meaning no coverage was measured.
pub const NO_COVERAGE: f64 = -1.0;

/// One CNV detail window or segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CnvData {
    /// Coverage relative to the diploid baseline, or [`NO_COVERAGE`].
    pub relative_coverage: f64,
    pub called_ploidy: String,
    pub called_level: String,
    pub best_laf: String,
    pub low_laf: String,
    pub high_laf: String,
}

impl CnvData {
    pub fn has_coverage(&self) -> bool {
        self.relative_coverage >= 0.0
    }
}

/// Column layout shared by CNV detail and segment sources.
#[derive(Debug, Clone, Copy)]
struct CnvColumns {
    range: RangeColumns,
    relative_coverage: usize,
    called_ploidy: Option<usize>,
    called_level: Option<usize>,
    laf: Option<LafColumns>,
}

impl CnvColumns {
    fn bind<S: RowSource + ?Sized>(source: &S, range: RangeColumns) -> Result<Self> {
        Ok(CnvColumns {
            range,
            relative_coverage: source.require_field("relativeCvg")?,
            called_ploidy: source.field_index("calledPloidy"),
            called_level: source.field_index("calledLevel"),
            laf: LafColumns::bind(source)?,
        })
    }

    fn read<C: ContigProvider + ?Sized>(&self, row: &Row<'_>, contigs: &C) -> Result<(Range, CnvData)> {
        let text = |column: Option<usize>| -> Result<String> {
            match column {
                Some(column) => Ok(row.get_str(column)?.to_string()),
                None => Ok(String::new()),
            }
        };

        let data = CnvData {
            relative_coverage: row.parse_or_sentinel(self.relative_coverage, "N", NO_COVERAGE)?,
            called_ploidy: text(self.called_ploidy)?,
            called_level: text(self.called_level)?,
            best_laf: text(self.laf.map(|laf| laf.best))?,
            low_laf: text(self.laf.map(|laf| laf.low))?,
            high_laf: text(self.laf.map(|laf| laf.high))?,
        };
        Ok((self.range.read(row, contigs)?, data))
    }

    fn load<S, C>(&self, source: &mut S, contigs: &C) -> Result<RangeAnnotationStore<CnvData>>
    where
        S: RowSource + ?Sized,
        C: ContigProvider + ?Sized,
    {
        let mut store = RangeAnnotationStore::new();
        store.load(source, contigs, |row| self.read(row, contigs))?;
        Ok(store)
    }
}

/// Parse the `WINDOW_WIDTH` metadata value a midpoint-encoded source must carry.
pub fn window_width(metadata: &Metadata) -> Result<u32> {
    let file = metadata.file_name();
    let value = metadata
        .get("WINDOW_WIDTH")
        .ok_or_else(|| StoreError::format(file, "missing WINDOW_WIDTH metadata"))?;
    match value.trim().parse::<u32>() {
        Ok(width) if width > 0 => Ok(width),
        _ => Err(StoreError::format(
            file,
            format!("invalid WINDOW_WIDTH metadata {value:?}"),
        )),
    }
}

///
/// CNV detail windows, from a `cnvDetails` file.
///
/// Older files give each window explicitly with `begin` and `end`. Newer files give only the
/// window `position` (its midpoint) plus a `WINDOW_WIDTH` metadata value; those windows are
/// rebuilt into a gapless tiling of every contig while loading.
///
#[derive(Debug, Clone)]
pub struct CnvDetailStore {
    store: RangeAnnotationStore<CnvData>,
    has_called_ploidy: bool,
    has_called_level: bool,
    laf_family: Option<LafFamily>,
    window_width: Option<u32>,
}

impl CnvDetailStore {
    ///
    /// Load a CNV detail file, gzipped or not.
    ///
    /// # Arguments
    /// - path: path to the CNV detail file
    /// - contigs: chromosome names and bounds of the reference
    pub fn open<P: AsRef<Path>, C: ContigProvider + ?Sized>(path: P, contigs: &C) -> Result<Self> {
        let mut source = DelimitedFile::from_path(path)?;
        Self::from_source(&mut source, contigs)
    }

    /// Load CNV detail windows from any row source.
    pub fn from_source<S, C>(source: &mut S, contigs: &C) -> Result<Self>
    where
        S: RowSource + ?Sized,
        C: ContigProvider + ?Sized,
    {
        let (range, window_width) = if source.has_field("position") {
            let width = window_width(source.metadata())?;
            (RangeColumns::midpoint(&*source, "chr", "position")?, Some(width))
        } else {
            (RangeColumns::explicit(&*source, "chr", "begin", "end")?, None)
        };

        let columns = CnvColumns::bind(&*source, range)?;
        let mut store = columns.load(source, contigs)?;
        if let Some(width) = window_width {
            store.tile_midpoints(contigs, width)?;
        }

        Ok(CnvDetailStore {
            store,
            has_called_ploidy: columns.called_ploidy.is_some(),
            has_called_level: columns.called_level.is_some(),
            laf_family: columns.laf.map(|laf| laf.family),
            window_width,
        })
    }

    pub fn has_called_ploidy(&self) -> bool {
        self.has_called_ploidy
    }

    pub fn has_called_level(&self) -> bool {
        self.has_called_level
    }

    pub fn has_laf(&self) -> bool {
        self.laf_family.is_some()
    }

    pub fn laf_family(&self) -> Option<LafFamily> {
        self.laf_family
    }

    /// Whether the windows were rebuilt from midpoints.
    pub fn is_midpoint_encoded(&self) -> bool {
        self.window_width.is_some()
    }

    /// The `WINDOW_WIDTH` of the source, when it was midpoint encoded.
    pub fn window_width(&self) -> Option<u32> {
        self.window_width
    }

    pub fn metadata(&self) -> &Metadata {
        self.store.metadata()
    }

    pub fn intersect(&self, range: &Range) -> Vec<&Entry<CnvData>> {
        self.store.intersect(range)
    }

    /// The window overlapping `range` the most.
    pub fn best_overlapping_detail(&self, range: &Range) -> Option<&CnvData> {
        self.store.best_overlapping(range)
    }

    pub fn store(&self) -> &RangeAnnotationStore<CnvData> {
        &self.store
    }
}

/// Called CNV segments, from a `cnvSegments` file with explicit `begin`/`end` columns.
#[derive(Debug, Clone)]
pub struct CnvSegmentStore {
    store: RangeAnnotationStore<CnvData>,
    has_called_ploidy: bool,
    has_called_level: bool,
    laf_family: Option<LafFamily>,
}

impl CnvSegmentStore {
    pub fn open<P: AsRef<Path>, C: ContigProvider + ?Sized>(path: P, contigs: &C) -> Result<Self> {
        let mut source = DelimitedFile::from_path(path)?;
        Self::from_source(&mut source, contigs)
    }

    pub fn from_source<S, C>(source: &mut S, contigs: &C) -> Result<Self>
    where
        S: RowSource + ?Sized,
        C: ContigProvider + ?Sized,
    {
        let range = RangeColumns::explicit(&*source, "chr", "begin", "end")?;
        let columns = CnvColumns::bind(&*source, range)?;
        let store = columns.load(source, contigs)?;

        Ok(CnvSegmentStore {
            store,
            has_called_ploidy: columns.called_ploidy.is_some(),
            has_called_level: columns.called_level.is_some(),
            laf_family: columns.laf.map(|laf| laf.family),
        })
    }

    pub fn has_called_ploidy(&self) -> bool {
        self.has_called_ploidy
    }

    pub fn has_called_level(&self) -> bool {
        self.has_called_level
    }

    pub fn has_laf(&self) -> bool {
        self.laf_family.is_some()
    }

    pub fn laf_family(&self) -> Option<LafFamily> {
        self.laf_family
    }

    pub fn metadata(&self) -> &Metadata {
        self.store.metadata()
    }

    pub fn intersect(&self, range: &Range) -> Vec<&Entry<CnvData>> {
        self.store.intersect(range)
    }

    /// The segment overlapping `range` the most.
    pub fn best_overlapping_segment(&self, range: &Range) -> Option<&CnvData> {
        self.store.best_overlapping(range)
    }

    pub fn store(&self) -> &RangeAnnotationStore<CnvData> {
        &self.store
    }
}
