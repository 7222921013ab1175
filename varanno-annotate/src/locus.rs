use varanno_core::models::Range;

/// A locus of a variant file, as far as annotation needs to know it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locus {
    pub range: Range,
    /// Every allele of the locus matches the reference.
    pub is_ref_call: bool,
    /// No allele of the locus could be called.
    pub is_no_call: bool,
}

impl Locus {
    /// A locus with at least one called variant allele.
    pub fn new(range: Range) -> Self {
        Locus {
            range,
            is_ref_call: false,
            is_no_call: false,
        }
    }

    pub fn ref_call(range: Range) -> Self {
        Locus {
            is_ref_call: true,
            ..Locus::new(range)
        }
    }

    pub fn no_call(range: Range) -> Self {
        Locus {
            is_no_call: true,
            ..Locus::new(range)
        }
    }

    /// Whether the locus carries anything to annotate beyond reference or no-call.
    pub fn is_variant(&self) -> bool {
        !self.is_ref_call && !self.is_no_call
    }
}
