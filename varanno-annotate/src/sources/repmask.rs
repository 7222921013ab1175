use std::collections::BTreeSet;

use varanno_io::Metadata;
use varanno_stores::RepeatMaskerStore;

use crate::error::Result;
use crate::locus::Locus;
use crate::sources::{AnnotationSource, check_reference_match};

/// Every RepeatMasker hit overlapping a locus, as sorted `name:family:divergence` items.
#[derive(Debug)]
pub struct RepeatMaskerAnnotation {
    store: RepeatMaskerStore,
}

impl RepeatMaskerAnnotation {
    pub fn new(store: RepeatMaskerStore) -> Self {
        RepeatMaskerAnnotation { store }
    }
}

impl AnnotationSource for RepeatMaskerAnnotation {
    fn name(&self) -> &str {
        "repeat masker"
    }

    fn add_meta(&self, output: &mut Metadata, variant: &Metadata) -> Result<()> {
        check_reference_match(self.name(), self.store.metadata(), variant)?;
        output.transfer(self.store.metadata(), "GENERATED_AT", "REPMASK_");
        Ok(())
    }

    fn headers(&self) -> Vec<String> {
        vec!["repeatMasker".to_string()]
    }

    fn columns(&self, locus: &Locus) -> Vec<String> {
        if !locus.is_variant() {
            return vec![String::new()];
        }

        let hits: BTreeSet<String> = self
            .store
            .intersect(&locus.range)
            .into_iter()
            .map(|entry| {
                let hit = entry.payload();
                format!("{}:{}:{:.1}", hit.name, hit.family, hit.divergence)
            })
            .collect();

        vec![hits.into_iter().collect::<Vec<_>>().join(";")]
    }
}
