pub mod cnv;
pub mod repmask;
pub mod segdup;

use varanno_io::Metadata;

use crate::error::{AnnotateError, Result};
use crate::locus::Locus;

pub use cnv::{CnvAnnotation, CnvKind};
pub use repmask::RepeatMaskerAnnotation;
pub use segdup::SegDupAnnotation;

pub const GENOME_REFERENCE: &str = "GENOME_REFERENCE";
pub const ASSEMBLY_ID: &str = "ASSEMBLY_ID";

/// Reference build assumed for variant files that predate the `GENOME_REFERENCE` key.
pub const OLD_BUILD: &str = "NCBI build 36";

///
/// A loaded annotation store that contributes columns to every annotated locus.
///
pub trait AnnotationSource {
    /// Short name used in error messages.
    fn name(&self) -> &str;

    ///
    /// Check the store's metadata against the variant file's and copy the store metadata
    /// worth keeping into the output metadata.
    ///
    /// # Arguments
    /// - output: metadata of the annotated output
    /// - variant: metadata of the variant file being annotated
    fn add_meta(&self, output: &mut Metadata, variant: &Metadata) -> Result<()>;

    /// Names of the columns this source adds.
    fn headers(&self) -> Vec<String>;

    /// Column values for one locus, one per header. Missing values are empty strings.
    fn columns(&self, locus: &Locus) -> Vec<String>;
}

///
/// Fail unless the store was built against the same reference as the variant file.
///
/// Variant files without a `GENOME_REFERENCE` key are taken to be [`OLD_BUILD`].
pub fn check_reference_match(source_name: &str, store: &Metadata, variant: &Metadata) -> Result<()> {
    let store_reference = store
        .get(GENOME_REFERENCE)
        .ok_or_else(|| AnnotateError::MissingMetadata {
            file: store.file_name().to_string(),
            key: GENOME_REFERENCE.to_string(),
        })?;
    let variant_reference = variant.get(GENOME_REFERENCE).unwrap_or(OLD_BUILD);

    if store_reference != variant_reference {
        return Err(AnnotateError::ReferenceMismatch {
            source_name: source_name.to_string(),
            store: store_reference.to_string(),
            variant: variant_reference.to_string(),
        });
    }
    Ok(())
}

///
/// Fail when the store and the variant file come from different assemblies.
///
/// Older files carry no `ASSEMBLY_ID`; when neither side has one there is nothing to check.
pub fn check_assembly_id(source_name: &str, store: &Metadata, variant: &Metadata) -> Result<()> {
    if !store.has_key(ASSEMBLY_ID) && !variant.has_key(ASSEMBLY_ID) {
        return Ok(());
    }

    let store_id = store.get(ASSEMBLY_ID).unwrap_or_default();
    let variant_id = variant.get(ASSEMBLY_ID).unwrap_or_default();
    if store_id != variant_id {
        return Err(AnnotateError::AssemblyMismatch {
            source_name: source_name.to_string(),
            store: store_id.to_string(),
            variant: variant_id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn metadata(entries: &[(&str, &str)]) -> Metadata {
        let mut meta = Metadata::new("store.tsv");
        for (key, value) in entries {
            meta.add(key, value);
        }
        meta
    }

    #[rstest]
    #[case(&[("GENOME_REFERENCE", "NCBI build 37")], &[("GENOME_REFERENCE", "NCBI build 37")], true)]
    #[case(&[("GENOME_REFERENCE", "NCBI build 36")], &[], true)]
    #[case(&[("GENOME_REFERENCE", "NCBI build 37")], &[], false)]
    #[case(&[("GENOME_REFERENCE", "NCBI build 37")], &[("GENOME_REFERENCE", "NCBI build 36")], false)]
    fn test_check_reference_match(
        #[case] store: &[(&str, &str)],
        #[case] variant: &[(&str, &str)],
        #[case] ok: bool,
    ) {
        let result = check_reference_match("segdup", &metadata(store), &metadata(variant));
        assert_eq!(result.is_ok(), ok);
    }

    #[rstest]
    fn test_reference_mismatch_message() {
        let err = check_reference_match(
            "segdup",
            &metadata(&[("GENOME_REFERENCE", "NCBI build 37")]),
            &metadata(&[]),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "segdup reference build 'NCBI build 37' doesn't match variation file reference 'NCBI build 36'"
        );
    }

    #[rstest]
    fn test_store_without_reference() {
        let err = check_reference_match("repeat masker", &metadata(&[]), &metadata(&[])).unwrap_err();
        assert_eq!(err.to_string(), "missing GENOME_REFERENCE metadata in store.tsv");
    }

    #[rstest]
    #[case(&[], &[], true)]
    #[case(&[("ASSEMBLY_ID", "GS1-ASM")], &[("ASSEMBLY_ID", "GS1-ASM")], true)]
    #[case(&[("ASSEMBLY_ID", "GS1-ASM")], &[("ASSEMBLY_ID", "GS2-ASM")], false)]
    #[case(&[("ASSEMBLY_ID", "GS1-ASM")], &[], false)]
    #[case(&[], &[("ASSEMBLY_ID", "GS1-ASM")], false)]
    fn test_check_assembly_id(
        #[case] store: &[(&str, &str)],
        #[case] variant: &[(&str, &str)],
        #[case] ok: bool,
    ) {
        let result = check_assembly_id("CNV", &metadata(store), &metadata(variant));
        assert_eq!(result.is_ok(), ok);
    }
}
