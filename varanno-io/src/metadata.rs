use std::io::{self, Write};

///
/// File-level key/value metadata of a delimited file.
///
/// Keys may repeat and insertion order is preserved, matching the `#KEY<TAB>VALUE` lines at
/// the top of the file. The name of the file the metadata was read from travels along so
/// that errors can point at it.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    file_name: String,
    entries: Vec<(String, String)>,
}

impl Metadata {
    pub fn new(file_name: &str) -> Self {
        Metadata {
            file_name: file_name.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn set_file_name(&mut self, file_name: &str) {
        self.file_name = file_name.to_string();
    }

    /// Append a key/value pair; earlier values for the same key are kept.
    pub fn add(&mut self, key: &str, value: &str) {
        self.entries.push((key.to_string(), value.to_string()));
    }

    /// The first value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_all(key).next()
    }

    /// All values stored under `key`, in file order.
    pub fn get_all<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a str> {
        self.entries
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    ///
    /// Copy every value of `key` from `from` into this metadata, renaming the key to
    /// `prefix` + `key`.
    ///
    /// Returns `false` when `from` has no such key.
    pub fn transfer(&mut self, from: &Metadata, key: &str, prefix: &str) -> bool {
        let renamed = format!("{prefix}{key}");
        let values: Vec<String> = from.get_all(key).map(str::to_string).collect();
        let found = !values.is_empty();
        for value in values {
            self.entries.push((renamed.clone(), value));
        }
        found
    }

    /// Write the metadata as `#KEY<TAB>VALUE` lines followed by a blank line.
    pub fn write_header<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (key, value) in &self.entries {
            writeln!(out, "#{key}\t{value}")?;
        }
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn metadata() -> Metadata {
        let mut meta = Metadata::new("cnvDetails.tsv");
        meta.add("ASSEMBLY_ID", "GS000000-ASM");
        meta.add("WINDOW_WIDTH", "2000");
        meta.add("DGV_VERSION", "9");
        meta.add("DGV_VERSION", "10");
        meta
    }

    #[rstest]
    fn test_get(metadata: Metadata) {
        assert_eq!(metadata.get("WINDOW_WIDTH"), Some("2000"));
        assert_eq!(metadata.get("DGV_VERSION"), Some("9"));
        assert_eq!(metadata.get("GENOME_REFERENCE"), None);
        assert_eq!(metadata.get_all("DGV_VERSION").collect::<Vec<_>>(), vec!["9", "10"]);
        assert!(metadata.has_key("ASSEMBLY_ID"));
        assert_eq!(metadata.file_name(), "cnvDetails.tsv");
    }

    #[rstest]
    fn test_transfer(metadata: Metadata) {
        let mut out = Metadata::new("out.tsv");
        assert!(out.transfer(&metadata, "WINDOW_WIDTH", "CNV_DIPLOID_"));
        assert!(out.transfer(&metadata, "DGV_VERSION", ""));
        assert!(!out.transfer(&metadata, "GENERATED_AT", "SEGDUP_"));

        assert_eq!(
            out.iter().collect::<Vec<_>>(),
            vec![
                ("CNV_DIPLOID_WINDOW_WIDTH", "2000"),
                ("DGV_VERSION", "9"),
                ("DGV_VERSION", "10"),
            ]
        );
    }

    #[rstest]
    fn test_write_header(metadata: Metadata) {
        let mut buf = Vec::new();
        metadata.write_header(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "#ASSEMBLY_ID\tGS000000-ASM\n#WINDOW_WIDTH\t2000\n#DGV_VERSION\t9\n#DGV_VERSION\t10\n\n"
        );
    }
}
