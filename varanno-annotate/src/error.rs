use thiserror::Error;

use varanno_core::errors::ContigError;
use varanno_stores::StoreError;

use super::config::AnnotationConfigError;

#[derive(Error, Debug)]
pub enum AnnotateError {
    #[error(transparent)]
    Config(#[from] AnnotationConfigError),
    #[error(transparent)]
    Contig(#[from] ContigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{source_name} reference build '{store}' doesn't match variation file reference '{variant}'")]
    ReferenceMismatch {
        source_name: String,
        store: String,
        variant: String,
    },
    #[error("variation file assembly ID '{variant}' doesn't match {source_name} assembly ID '{store}'")]
    AssemblyMismatch {
        source_name: String,
        store: String,
        variant: String,
    },
    #[error("missing {key} metadata in {file}")]
    MissingMetadata { file: String, key: String },
    #[error("{column} column expected in {file}")]
    MissingColumn { file: String, column: String },
}

pub type Result<T> = std::result::Result<T, AnnotateError>;
