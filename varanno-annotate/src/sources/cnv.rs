use varanno_io::Metadata;
use varanno_stores::cnv::window_width;
use varanno_stores::{CnvData, CnvDetailStore};

use crate::error::{AnnotateError, Result};
use crate::locus::Locus;
use crate::sources::{AnnotationSource, check_assembly_id};

/// Which CNV calls a detail store holds, and so which columns it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CnvKind {
    Diploid,
    Nondiploid,
    SomaticNondiploid,
}

impl CnvKind {
    /// Prefix for the `WINDOW_WIDTH` key copied into the output metadata.
    pub fn meta_prefix(&self) -> &'static str {
        match self {
            CnvKind::Diploid => "CNV_DIPLOID_",
            CnvKind::Nondiploid => "CNV_NONDIPLOID_",
            CnvKind::SomaticNondiploid => "CNV_SOMATIC_NONDIPLOID_",
        }
    }

    fn coverage_header(&self) -> &'static str {
        match self {
            CnvKind::Diploid => "relativeCoverageDiploid",
            CnvKind::Nondiploid => "relativeCoverageNondiploid",
            CnvKind::SomaticNondiploid => "relativeCoverageSomaticNondiploid",
        }
    }

    fn call_header(&self) -> &'static str {
        match self {
            CnvKind::Diploid => "calledPloidy",
            CnvKind::Nondiploid => "calledLevel",
            CnvKind::SomaticNondiploid => "somaticCalledLevel",
        }
    }

    /// LAF columns are rendered under the name of the family the caller produces.
    fn laf_headers(&self) -> &'static [&'static str] {
        match self {
            CnvKind::Diploid => &[],
            CnvKind::Nondiploid => &["bestLAFsingle", "lowLAFsingle", "highLAFsingle"],
            CnvKind::SomaticNondiploid => &["bestLAFpaired", "lowLAFpaired", "highLAFpaired"],
        }
    }
}

/// Render a relative coverage value, `N` for windows without coverage.
pub fn format_coverage(detail: &CnvData) -> String {
    if detail.has_coverage() {
        format!("{:.2}", detail.relative_coverage)
    } else {
        "N".to_string()
    }
}

///
/// Copy number calls of the CNV detail window that best overlaps each locus.
///
/// Loci spanning two or more windows are left empty: a single window's call says little
/// about them.
///
#[derive(Debug)]
pub struct CnvAnnotation {
    kind: CnvKind,
    store: CnvDetailStore,
    window_width: u32,
}

impl CnvAnnotation {
    ///
    /// Wrap a loaded detail store.
    ///
    /// Diploid annotation needs a `calledPloidy` column, the nondiploid kinds need
    /// `calledLevel`, and every kind needs `WINDOW_WIDTH` metadata.
    pub fn new(kind: CnvKind, store: CnvDetailStore) -> Result<Self> {
        let (has_call, column) = match kind {
            CnvKind::Diploid => (store.has_called_ploidy(), "calledPloidy"),
            _ => (store.has_called_level(), "calledLevel"),
        };
        if !has_call {
            return Err(AnnotateError::MissingColumn {
                file: store.metadata().file_name().to_string(),
                column: column.to_string(),
            });
        }

        let window_width = window_width(store.metadata())?;
        Ok(CnvAnnotation {
            kind,
            store,
            window_width,
        })
    }

    pub fn kind(&self) -> CnvKind {
        self.kind
    }

    pub fn store(&self) -> &CnvDetailStore {
        &self.store
    }

    fn column_count(&self) -> usize {
        if self.store.has_laf() {
            2 + self.kind.laf_headers().len()
        } else {
            2
        }
    }
}

impl AnnotationSource for CnvAnnotation {
    fn name(&self) -> &str {
        "CNV"
    }

    fn add_meta(&self, output: &mut Metadata, variant: &Metadata) -> Result<()> {
        let meta = self.store.metadata();
        check_assembly_id(self.name(), meta, variant)?;
        output.transfer(meta, "DGV_VERSION", "");
        output.transfer(meta, "WINDOW_WIDTH", self.kind.meta_prefix());
        Ok(())
    }

    fn headers(&self) -> Vec<String> {
        let mut headers = vec![
            self.kind.coverage_header().to_string(),
            self.kind.call_header().to_string(),
        ];
        if self.store.has_laf() {
            headers.extend(self.kind.laf_headers().iter().map(|h| h.to_string()));
        }
        headers
    }

    fn columns(&self, locus: &Locus) -> Vec<String> {
        let empty = || vec![String::new(); self.column_count()];

        if u64::from(locus.range.length()) >= 2 * u64::from(self.window_width) {
            return empty();
        }
        let Some(detail) = self.store.best_overlapping_detail(&locus.range) else {
            return empty();
        };

        let call = match self.kind {
            CnvKind::Diploid => &detail.called_ploidy,
            _ => &detail.called_level,
        };
        let mut columns = vec![format_coverage(detail), call.clone()];
        if self.column_count() > 2 {
            columns.extend([
                detail.best_laf.clone(),
                detail.low_laf.clone(),
                detail.high_laf.clone(),
            ]);
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use std::io::Cursor;
    use varanno_core::models::{ChromosomeTable, Range};
    use varanno_io::DelimitedFile;

    #[fixture]
    fn contigs() -> ChromosomeTable {
        ChromosomeTable::from_chrom_sizes("../tests/data/stores/chrom.sizes").unwrap()
    }

    fn annotation(kind: CnvKind, contigs: &ChromosomeTable) -> CnvAnnotation {
        let store = CnvDetailStore::open("../tests/data/stores/cnvDetails.tsv", contigs).unwrap();
        CnvAnnotation::new(kind, store).unwrap()
    }

    #[rstest]
    fn test_diploid(contigs: ChromosomeTable) {
        let cnv = annotation(CnvKind::Diploid, &contigs);
        assert_eq!(cnv.headers(), vec!["relativeCoverageDiploid", "calledPloidy"]);

        assert_eq!(cnv.columns(&Locus::new(Range::new(0, 6200, 6201))), vec!["1.53", "3"]);
        assert_eq!(cnv.columns(&Locus::new(Range::new(0, 500, 510))), vec!["0.90", "2"]);
    }

    #[rstest]
    fn test_no_coverage_renders_as_n(contigs: ChromosomeTable) {
        let cnv = annotation(CnvKind::Diploid, &contigs);
        assert_eq!(cnv.columns(&Locus::new(Range::new(0, 3100, 3200))), vec!["N", "N"]);
    }

    #[rstest]
    fn test_nondiploid_with_laf(contigs: ChromosomeTable) {
        let cnv = annotation(CnvKind::Nondiploid, &contigs);
        assert_eq!(
            cnv.headers(),
            vec![
                "relativeCoverageNondiploid",
                "calledLevel",
                "bestLAFsingle",
                "lowLAFsingle",
                "highLAFsingle",
            ]
        );
        assert_eq!(
            cnv.columns(&Locus::new(Range::new(0, 6000, 6010))),
            vec!["1.53", "1.5", "0.33", "0.29", "0.36"]
        );
    }

    #[rstest]
    fn test_long_locus_is_empty(contigs: ChromosomeTable) {
        let cnv = annotation(CnvKind::SomaticNondiploid, &contigs);
        assert_eq!(cnv.headers()[1], "somaticCalledLevel");
        assert_eq!(cnv.columns(&Locus::new(Range::new(0, 0, 2000))), vec![""; 5]);
        assert_eq!(cnv.columns(&Locus::new(Range::new(0, 0, 1999)))[0], "0.90");
    }

    #[rstest]
    fn test_add_meta(contigs: ChromosomeTable) {
        let cnv = annotation(CnvKind::Nondiploid, &contigs);
        let mut variant = Metadata::new("var.tsv");
        variant.add("ASSEMBLY_ID", "GS00001-DNA_A01_ASM");

        let mut output = Metadata::new("out.tsv");
        cnv.add_meta(&mut output, &variant).unwrap();
        assert_eq!(
            output.iter().collect::<Vec<_>>(),
            vec![("DGV_VERSION", "9"), ("CNV_NONDIPLOID_WINDOW_WIDTH", "1000")]
        );

        let mut other = Metadata::new("var.tsv");
        other.add("ASSEMBLY_ID", "GS00002-DNA_B01_ASM");
        assert!(matches!(
            cnv.add_meta(&mut output, &other),
            Err(AnnotateError::AssemblyMismatch { .. })
        ));
    }

    #[rstest]
    fn test_requires_called_ploidy(contigs: ChromosomeTable) {
        let text = "#WINDOW_WIDTH\t1000\n>chr\tposition\trelativeCvg\tcalledLevel\nchr1\t500\t1.0\t1.0\n";
        let mut source = DelimitedFile::from_reader(Cursor::new(text), "cnvDetails.tsv").unwrap();
        let store = CnvDetailStore::from_source(&mut source, &contigs).unwrap();

        let err = CnvAnnotation::new(CnvKind::Diploid, store).unwrap_err();
        assert_eq!(err.to_string(), "calledPloidy column expected in cnvDetails.tsv");
    }

    #[rstest]
    fn test_explicit_store_needs_window_width(contigs: ChromosomeTable) {
        let text = ">chr\tbegin\tend\trelativeCvg\tcalledLevel\nchr1\t0\t500\t1.0\t1.0\n";
        let mut source = DelimitedFile::from_reader(Cursor::new(text), "cnvDetails.tsv").unwrap();
        let store = CnvDetailStore::from_source(&mut source, &contigs).unwrap();

        let err = CnvAnnotation::new(CnvKind::Nondiploid, store).unwrap_err();
        assert!(matches!(err, AnnotateError::Store(_)));
    }
}
