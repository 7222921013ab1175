use varanno_io::Metadata;
use varanno_stores::SegDupStore;

use crate::error::Result;
use crate::locus::Locus;
use crate::sources::{AnnotationSource, check_reference_match};

/// The largest segmental duplication count among the duplications overlapping each locus.
#[derive(Debug)]
pub struct SegDupAnnotation {
    store: SegDupStore,
}

impl SegDupAnnotation {
    pub fn new(store: SegDupStore) -> Self {
        SegDupAnnotation { store }
    }
}

impl AnnotationSource for SegDupAnnotation {
    fn name(&self) -> &str {
        "segdup"
    }

    fn add_meta(&self, output: &mut Metadata, variant: &Metadata) -> Result<()> {
        check_reference_match(self.name(), self.store.metadata(), variant)?;
        output.transfer(self.store.metadata(), "GENERATED_AT", "SEGDUP_");
        Ok(())
    }

    fn headers(&self) -> Vec<String> {
        vec!["segDupOverlap".to_string()]
    }

    fn columns(&self, locus: &Locus) -> Vec<String> {
        if !locus.is_variant() {
            return vec![String::new()];
        }

        let overlap = self
            .store
            .intersect(&locus.range)
            .into_iter()
            .map(|entry| entry.payload().count)
            .max()
            .unwrap_or(0);

        match overlap {
            0 => vec![String::new()],
            count => vec![count.to_string()],
        }
    }
}
