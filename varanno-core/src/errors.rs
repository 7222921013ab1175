use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContigError {
    #[error("Can't read file: {0}")]
    FileReadError(anyhow::Error),

    #[error("Error parsing chromosome sizes: {0}")]
    ParseError(String),

    #[error("Chromosome listed more than once: {0}")]
    DuplicateChromosome(String),

    #[error("Too many chromosomes for a 16-bit id: {0}")]
    TooManyChromosomes(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
