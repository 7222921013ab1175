use std::collections::HashMap;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use varanno_core::utils::get_dynamic_reader;

use crate::error::{DelimitedFileError, Result};
use crate::metadata::Metadata;

///
/// A source of named, typed rows with file-level metadata.
///
/// Column presence varies between file versions, so consumers probe with
/// [`has_field`](RowSource::has_field) before binding optional columns.
///
pub trait RowSource {
    /// File-level metadata, including the file name used in error messages.
    fn metadata(&self) -> &Metadata;

    /// Position of the named column, if the source has it.
    fn field_index(&self, name: &str) -> Option<usize>;

    fn has_field(&self, name: &str) -> bool {
        self.field_index(name).is_some()
    }

    /// Position of a column that must be present.
    fn require_field(&self, name: &str) -> Result<usize> {
        self.field_index(name)
            .ok_or_else(|| DelimitedFileError::MissingColumn {
                file: self.metadata().file_name().to_string(),
                column: name.to_string(),
            })
    }

    /// Advance to the next data row; `None` at the end of the source.
    fn next_row(&mut self) -> Result<Option<Row<'_>>>;
}

///
/// One data row of a [`RowSource`], borrowed until the next call to
/// [`next_row`](RowSource::next_row).
///
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    fields: &'a [String],
    headers: &'a [String],
    file_name: &'a str,
    line_number: usize,
}

impl<'a> Row<'a> {
    pub fn new(fields: &'a [String], headers: &'a [String], file_name: &'a str, line_number: usize) -> Self {
        Row {
            fields,
            headers,
            file_name,
            line_number,
        }
    }

    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn file_name(&self) -> &'a str {
        self.file_name
    }

    /// Name of the column at `column`, for error messages.
    pub fn column_name(&self, column: usize) -> &'a str {
        self.headers.get(column).map_or("?", String::as_str)
    }

    /// The raw text of a field.
    pub fn get_str(&self, column: usize) -> Result<&'a str> {
        self.fields
            .get(column)
            .map(String::as_str)
            .ok_or_else(|| DelimitedFileError::FieldCount {
                file: self.file_name.to_string(),
                line: self.line_number,
                expected: column + 1,
                found: self.fields.len(),
            })
    }

    /// Parse a field into `T`.
    pub fn parse<T: FromStr>(&self, column: usize) -> Result<T> {
        let value = self.get_str(column)?;
        value.trim().parse::<T>().map_err(|_| self.invalid_value(column, value))
    }

    /// Parse a field into `T`, mapping the literal `sentinel` text to `value`.
    ///
    /// CNV files write `N` where no coverage was measured, for example.
    pub fn parse_or_sentinel<T: FromStr>(&self, column: usize, sentinel: &str, value: T) -> Result<T> {
        if self.get_str(column)? == sentinel {
            return Ok(value);
        }
        self.parse(column)
    }

    /// Build an [`InvalidValue`](DelimitedFileError::InvalidValue) error for this row.
    pub fn invalid_value(&self, column: usize, value: &str) -> DelimitedFileError {
        DelimitedFileError::InvalidValue {
            file: self.file_name.to_string(),
            line: self.line_number,
            column: self.column_name(column).to_string(),
            value: value.to_string(),
        }
    }
}

///
/// Reader for tab-delimited annotation files.
///
/// The layout is a block of `#KEY<TAB>VALUE` metadata lines, optional blank lines, a header
/// line starting with `>` that names the columns, then one tab-separated row per record:
///
/// ```text
/// #GENOME_REFERENCE	NCBI build 37
/// #GENERATED_AT	2010-Nov-05 10:33
///
/// >chromosome	begin	end	count
/// chr1	10000	20000	2
/// ```
///
pub struct DelimitedFile<R: BufRead> {
    reader: R,
    metadata: Metadata,
    headers: Vec<String>,
    columns: HashMap<String, usize>,
    fields: Vec<String>,
    line: String,
    line_number: usize,
}

impl DelimitedFile<BufReader<Box<dyn Read>>> {
    ///
    /// Open a delimited file on disk, gzipped or not.
    ///
    /// # Arguments
    /// - path: path to the file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path.display().to_string();
        let reader = get_dynamic_reader(path).map_err(|e| DelimitedFileError::Open {
            file: file_name.clone(),
            message: format!("{e:#}"),
        })?;
        DelimitedFile::from_reader(reader, &file_name)
    }
}

impl<R: BufRead> DelimitedFile<R> {
    ///
    /// Read the metadata and header of a delimited source, leaving the reader positioned at
    /// the first data row.
    ///
    /// # Arguments
    /// - reader: the buffered source
    /// - file_name: name reported in metadata and errors
    pub fn from_reader(reader: R, file_name: &str) -> Result<Self> {
        let mut file = DelimitedFile {
            reader,
            metadata: Metadata::new(file_name),
            headers: Vec::new(),
            columns: HashMap::new(),
            fields: Vec::new(),
            line: String::new(),
            line_number: 0,
        };
        file.read_header()?;
        Ok(file)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    fn file_name(&self) -> &str {
        self.metadata.file_name()
    }

    /// Read one line into `self.line`, without its line terminator.
    fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        let read = self
            .reader
            .read_line(&mut self.line)
            .map_err(|source| DelimitedFileError::Io {
                file: self.metadata.file_name().to_string(),
                source,
            })?;
        if read == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        let trimmed = self.line.trim_end_matches(['\n', '\r']).len();
        self.line.truncate(trimmed);
        Ok(true)
    }

    fn read_header(&mut self) -> Result<()> {
        while self.read_line()? {
            if let Some(meta) = self.line.strip_prefix('#') {
                let (key, value) = meta.split_once('\t').unwrap_or((meta, ""));
                let (key, value) = (key.to_string(), value.to_string());
                self.metadata.add(&key, &value);
            } else if let Some(header) = self.line.strip_prefix('>') {
                self.headers = header.split('\t').map(str::to_string).collect();
                for (idx, column) in self.headers.iter().enumerate() {
                    if self.columns.insert(column.clone(), idx).is_some() {
                        return Err(DelimitedFileError::DuplicateColumn {
                            file: self.file_name().to_string(),
                            column: column.clone(),
                        });
                    }
                }
                return Ok(());
            } else if !self.line.trim().is_empty() {
                break;
            }
        }

        Err(DelimitedFileError::MissingHeader {
            file: self.file_name().to_string(),
            line: self.line_number,
        })
    }
}

impl<R: BufRead> RowSource for DelimitedFile<R> {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn field_index(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    fn next_row(&mut self) -> Result<Option<Row<'_>>> {
        loop {
            if !self.read_line()? {
                return Ok(None);
            }
            if !self.line.is_empty() {
                break;
            }
        }

        self.fields.clear();
        self.fields.extend(self.line.split('\t').map(str::to_string));
        if self.fields.len() != self.headers.len() {
            return Err(DelimitedFileError::FieldCount {
                file: self.file_name().to_string(),
                line: self.line_number,
                expected: self.headers.len(),
                found: self.fields.len(),
            });
        }

        Ok(Some(Row::new(
            &self.fields,
            &self.headers,
            self.metadata.file_name(),
            self.line_number,
        )))
    }
}
