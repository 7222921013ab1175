use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use crate::errors::ContigError;
use crate::models::range::{ChromosomeId, Range};
use crate::utils::get_dynamic_reader;

///
/// Source of chromosome identities and coordinate bounds.
///
/// Stores use this to translate chromosome names found in text sources into ids, to
/// validate ranges before they are indexed, and to enumerate contigs when re-tiling.
///
pub trait ContigProvider {
    /// Look up the id of a chromosome by name.
    fn chromosome_id(&self, name: &str) -> Option<ChromosomeId>;

    /// The name of a chromosome id.
    fn chromosome_name(&self, id: ChromosomeId) -> Option<&str>;

    /// The valid coordinate range `[0, length)` of a chromosome.
    fn chromosome_range(&self, id: ChromosomeId) -> Option<Range>;

    /// All contigs, in chromosome order.
    fn contigs(&self) -> Vec<Range>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Chromosome {
    name: String,
    length: u32,
}

///
/// A [`ContigProvider`] built from chromosome names and lengths, such as the contents of
/// a `chrom.sizes` file. Ids are assigned in the order chromosomes are listed, and each
/// chromosome is one contig.
///
#[derive(Debug, Clone, Default)]
pub struct ChromosomeTable {
    chromosomes: Vec<Chromosome>,
    ids: HashMap<String, ChromosomeId>,
}

impl ChromosomeTable {
    pub fn new() -> Self {
        Self::default()
    }

    ///
    /// Append a chromosome and return its id.
    ///
    /// # Arguments
    /// - name: chromosome name, e.g. `chr1`
    /// - length: number of bases on the chromosome
    pub fn add(&mut self, name: &str, length: u32) -> Result<ChromosomeId, ContigError> {
        if self.ids.contains_key(name) {
            return Err(ContigError::DuplicateChromosome(name.to_string()));
        }
        let id = ChromosomeId::try_from(self.chromosomes.len())
            .map_err(|_| ContigError::TooManyChromosomes(self.chromosomes.len()))?;
        self.chromosomes.push(Chromosome {
            name: name.to_string(),
            length,
        });
        self.ids.insert(name.to_string(), id);
        Ok(id)
    }

    ///
    /// Read a two column `name<TAB>length` file, gzipped or not.
    ///
    /// # Arguments
    /// - path: path to the chrom sizes file
    pub fn from_chrom_sizes<T: AsRef<Path>>(path: T) -> Result<Self, ContigError> {
        let path = path.as_ref();
        let reader = get_dynamic_reader(path).map_err(ContigError::FileReadError)?;

        let mut table = ChromosomeTable::new();
        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let (Some(name), Some(length)) = (parts.next(), parts.next()) else {
                return Err(ContigError::ParseError(format!(
                    "{}:{}: expected `name length`, got {:?}",
                    path.display(),
                    line_number + 1,
                    line
                )));
            };
            let length = length.parse::<u32>().map_err(|_| {
                ContigError::ParseError(format!(
                    "{}:{}: invalid chromosome length {:?}",
                    path.display(),
                    line_number + 1,
                    length
                ))
            })?;
            table.add(name, length)?;
        }

        Ok(table)
    }

    /// Build a table from `(name, length)` pairs.
    pub fn from_sizes<'a, I>(sizes: I) -> Result<Self, ContigError>
    where
        I: IntoIterator<Item = (&'a str, u32)>,
    {
        let mut table = ChromosomeTable::new();
        for (name, length) in sizes {
            table.add(name, length)?;
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chromosomes.is_empty()
    }
}

impl ContigProvider for ChromosomeTable {
    fn chromosome_id(&self, name: &str) -> Option<ChromosomeId> {
        self.ids.get(name).copied()
    }

    fn chromosome_name(&self, id: ChromosomeId) -> Option<&str> {
        self.chromosomes
            .get(usize::from(id))
            .map(|chrom| chrom.name.as_str())
    }

    fn chromosome_range(&self, id: ChromosomeId) -> Option<Range> {
        self.chromosomes
            .get(usize::from(id))
            .map(|chrom| Range::new(id, 0, chrom.length))
    }

    fn contigs(&self) -> Vec<Range> {
        (0..self.chromosomes.len())
            .filter_map(|idx| ChromosomeId::try_from(idx).ok())
            .filter_map(|id| self.chromosome_range(id))
            .collect()
    }
}
