use std::path::Path;

use tracing::info;

use varanno_core::models::ChromosomeTable;
use varanno_io::Metadata;
use varanno_stores::{CnvDetailStore, RepeatMaskerStore, SegDupStore};

use crate::config::{AnnotationConfig, AnnotationKind};
use crate::error::Result;
use crate::locus::Locus;
use crate::sources::{
    AnnotationSource, CnvAnnotation, CnvKind, RepeatMaskerAnnotation, SegDupAnnotation,
};

///
/// An ordered set of annotation sources applied to every locus of a variant file.
///
/// Each source contributes a fixed number of columns; the annotator lays them out side by
/// side in the order the sources were added.
///
pub struct Annotator {
    contigs: ChromosomeTable,
    sources: Vec<Box<dyn AnnotationSource>>,
}

impl Annotator {
    ///
    /// Create an annotator without sources
    ///
    pub fn new(contigs: ChromosomeTable) -> Self {
        Annotator {
            contigs,
            sources: Vec::new(),
        }
    }

    ///
    /// Create an annotator from a config file, loading every source it lists.
    ///
    /// Paths in the config are relative to the config file.
    ///
    pub fn from_config<P: AsRef<Path>>(cfg_path: P) -> Result<Self> {
        let cfg_path = cfg_path.as_ref();
        let config = AnnotationConfig::try_from(cfg_path)?;

        let contigs =
            ChromosomeTable::from_chrom_sizes(AnnotationConfig::resolve(cfg_path, &config.chrom_sizes))?;
        let mut annotator = Annotator::new(contigs);

        for source in &config.sources {
            let path = AnnotationConfig::resolve(cfg_path, &source.path);
            let contigs = &annotator.contigs;
            let loaded: Box<dyn AnnotationSource> = match source.kind {
                AnnotationKind::SegDup => Box::new(SegDupAnnotation::new(SegDupStore::open(&path, contigs)?)),
                AnnotationKind::RepeatMasker => Box::new(RepeatMaskerAnnotation::new(
                    RepeatMaskerStore::open(&path, contigs)?,
                )),
                AnnotationKind::CnvDiploid => Box::new(CnvAnnotation::new(
                    CnvKind::Diploid,
                    CnvDetailStore::open(&path, contigs)?,
                )?),
                AnnotationKind::CnvNondiploid => Box::new(CnvAnnotation::new(
                    CnvKind::Nondiploid,
                    CnvDetailStore::open(&path, contigs)?,
                )?),
                AnnotationKind::CnvSomaticNondiploid => Box::new(CnvAnnotation::new(
                    CnvKind::SomaticNondiploid,
                    CnvDetailStore::open(&path, contigs)?,
                )?),
            };
            info!(kind = ?source.kind, path = %path.display(), "loaded annotation source");
            annotator.add_source(loaded);
        }

        Ok(annotator)
    }

    pub fn add_source(&mut self, source: Box<dyn AnnotationSource>) {
        self.sources.push(source);
    }

    pub fn contigs(&self) -> &ChromosomeTable {
        &self.contigs
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    ///
    /// Check every source against the variant file metadata and collect the output metadata.
    ///
    /// # Arguments
    /// - output: metadata of the annotated output, extended in place
    /// - variant: metadata of the variant file
    pub fn add_meta(&self, output: &mut Metadata, variant: &Metadata) -> Result<()> {
        for source in &self.sources {
            source.add_meta(output, variant)?;
        }
        Ok(())
    }

    /// Column names contributed by all sources, in order.
    pub fn headers(&self) -> Vec<String> {
        self.sources.iter().flat_map(|source| source.headers()).collect()
    }

    ///
    /// The `>`-prefixed header line of the annotated output.
    ///
    /// # Arguments
    /// - prefix_columns: the columns written ahead of the annotations, e.g. the locus columns
    pub fn header_line(&self, prefix_columns: &[&str]) -> String {
        let columns: Vec<String> = prefix_columns
            .iter()
            .map(|column| column.to_string())
            .chain(self.headers())
            .collect();
        format!(">{}", columns.join("\t"))
    }

    /// Annotation values for one locus, from all sources, in header order.
    pub fn columns(&self, locus: &Locus) -> Vec<String> {
        self.sources.iter().flat_map(|source| source.columns(locus)).collect()
    }

    /// The annotation columns of one locus, tab separated.
    pub fn annotate(&self, locus: &Locus) -> String {
        self.columns(locus).join("\t")
    }
}
