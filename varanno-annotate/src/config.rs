use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kinds of annotation a config file can request.
///
/// The names match the annotation names used on the command line of the combine tool.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationKind {
    #[serde(rename = "segdup")]
    SegDup,
    #[serde(rename = "repeat")]
    RepeatMasker,
    #[serde(rename = "cnvDiploid")]
    CnvDiploid,
    #[serde(rename = "cnvNondiploid")]
    CnvNondiploid,
    #[serde(rename = "cnvSomNondiploid")]
    CnvSomaticNondiploid,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SourceConfig {
    pub kind: AnnotationKind,
    pub path: String, // relative to the config file
}

///
/// Annotation sources to load, read from a TOML file:
///
/// ```toml
/// chrom_sizes = "hg19.chrom.sizes"
///
/// [[sources]]
/// kind = "segdup"
/// path = "segdup.tsv.gz"
///
/// [[sources]]
/// kind = "cnvDiploid"
/// path = "cnvDetailsDiploidBeta-GS00001.tsv"
/// ```
///
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AnnotationConfig {
    pub chrom_sizes: String,
    #[serde(default)]
    pub sources: Vec<SourceConfig>,
}

#[derive(Error, Debug)]
pub enum AnnotationConfigError {
    #[error("Annotation config file must have a `toml` extension")]
    InvalidFileType,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type AnnotationConfigResult<T> = std::result::Result<T, AnnotationConfigError>;

impl AnnotationConfig {
    ///
    /// Resolve a path from the config against the directory holding the config file.
    ///
    /// # Arguments
    /// * `config_path` - path of the config file itself
    /// * `path` - a path as written in the config
    pub fn resolve(config_path: &Path, path: &str) -> PathBuf {
        match config_path.parent() {
            Some(dir) => dir.join(path),
            None => PathBuf::from(path),
        }
    }
}

impl TryFrom<&Path> for AnnotationConfig {
    type Error = AnnotationConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        if path.extension().and_then(|ext| ext.to_str()) != Some("toml") {
            return Err(AnnotationConfigError::InvalidFileType);
        }
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_try_from_toml() {
        let path = PathBuf::from("../tests/data/annotate/annotate.toml");
        let config = AnnotationConfig::try_from(path.as_path()).unwrap();

        assert_eq!(config.chrom_sizes, "../stores/chrom.sizes");
        assert_eq!(
            config.sources.iter().map(|s| s.kind).collect::<Vec<_>>(),
            vec![
                AnnotationKind::SegDup,
                AnnotationKind::RepeatMasker,
                AnnotationKind::CnvDiploid,
                AnnotationKind::CnvNondiploid,
            ]
        );
    }

    #[rstest]
    fn test_resolve() {
        let path = PathBuf::from("../tests/data/annotate/annotate.toml");
        assert_eq!(
            AnnotationConfig::resolve(&path, "../stores/segdup.tsv"),
            PathBuf::from("../tests/data/annotate/../stores/segdup.tsv")
        );
    }

    #[rstest]
    fn test_invalid_extension() {
        let result = AnnotationConfig::try_from(Path::new("annotate.yaml"));
        assert!(matches!(result, Err(AnnotationConfigError::InvalidFileType)));
    }

    #[rstest]
    fn test_unknown_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(
            &path,
            "chrom_sizes = \"chrom.sizes\"\n[[sources]]\nkind = \"gene\"\npath = \"gene.tsv\"\n",
        )
        .unwrap();

        let result = AnnotationConfig::try_from(path.as_path());
        assert!(matches!(result, Err(AnnotationConfigError::Toml(_))));
    }
}
