use varanno_core::models::{ContigProvider, Range};
use varanno_io::{Row, RowSource};

use crate::error::{Result, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeKind {
    Explicit { begin: usize, end: usize },
    Midpoint { position: usize },
}

///
/// The columns of a source that define each record's range.
///
/// Explicit sources give `begin` and `end`; midpoint sources give a single `position`, which
/// is read as the one-base range `[position, position + 1)` until the windows are rebuilt
/// by [`tile_midpoints`](crate::RangeAnnotationStore::tile_midpoints).
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeColumns {
    chromosome: usize,
    kind: RangeKind,
}

impl RangeColumns {
    ///
    /// Bind explicit `[begin, end)` range columns.
    ///
    /// # Arguments
    /// - source: the row source the columns belong to
    /// - chromosome: name of the chromosome column
    /// - begin: name of the begin column
    /// - end: name of the end column
    pub fn explicit<S: RowSource + ?Sized>(
        source: &S,
        chromosome: &str,
        begin: &str,
        end: &str,
    ) -> Result<Self> {
        Ok(RangeColumns {
            chromosome: source.require_field(chromosome)?,
            kind: RangeKind::Explicit {
                begin: source.require_field(begin)?,
                end: source.require_field(end)?,
            },
        })
    }

    /// Bind a chromosome column and a midpoint column.
    pub fn midpoint<S: RowSource + ?Sized>(source: &S, chromosome: &str, position: &str) -> Result<Self> {
        Ok(RangeColumns {
            chromosome: source.require_field(chromosome)?,
            kind: RangeKind::Midpoint {
                position: source.require_field(position)?,
            },
        })
    }

    pub fn is_midpoint(&self) -> bool {
        matches!(self.kind, RangeKind::Midpoint { .. })
    }

    ///
    /// Read the range of one row, resolving the chromosome name through `contigs`.
    ///
    /// Bounds are not checked here; the store checks every range before inserting it.
    pub fn read<C: ContigProvider + ?Sized>(&self, row: &Row<'_>, contigs: &C) -> Result<Range> {
        let name = row.get_str(self.chromosome)?;
        let chromosome = contigs.chromosome_id(name).ok_or_else(|| {
            StoreError::format(
                row.file_name(),
                format!("unknown chromosome {name:?} at line {}", row.line_number()),
            )
        })?;

        let (begin, end) = match self.kind {
            RangeKind::Explicit { begin, end } => (row.parse::<u32>(begin)?, row.parse::<u32>(end)?),
            RangeKind::Midpoint { position } => {
                let midpoint = row.parse::<u32>(position)?;
                let end = midpoint
                    .checked_add(1)
                    .ok_or_else(|| row.invalid_value(position, &midpoint.to_string()))?;
                (midpoint, end)
            }
        };

        if begin > end {
            return Err(StoreError::format(
                row.file_name(),
                format!("range begin {begin} is past its end {end} at line {}", row.line_number()),
            ));
        }

        Ok(Range::new(chromosome, begin, end))
    }
}

///
/// The naming variants of the lesser allele frequency columns.
///
/// A CNV source carries at most one `best`/`low`/`high` triple, named with a `single` suffix,
/// a `paired` suffix, or no suffix at all in older files.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LafFamily {
    Single,
    Paired,
    Legacy,
}

impl LafFamily {
    pub const ALL: [LafFamily; 3] = [LafFamily::Single, LafFamily::Paired, LafFamily::Legacy];

    pub fn suffix(&self) -> &'static str {
        match self {
            LafFamily::Single => "single",
            LafFamily::Paired => "paired",
            LafFamily::Legacy => "",
        }
    }

    /// Column names of the `best`, `low` and `high` fields of this family.
    pub fn column_names(&self) -> [String; 3] {
        let suffix = self.suffix();
        [
            format!("bestLAF{suffix}"),
            format!("lowLAF{suffix}"),
            format!("highLAF{suffix}"),
        ]
    }

    ///
    /// Find which family a source uses, if any.
    ///
    /// Fails when `best` columns of more than one family are present, or when the present
    /// family lacks its `low` or `high` column.
    pub fn detect<S: RowSource + ?Sized>(source: &S) -> Result<Option<LafFamily>> {
        let file = source.metadata().file_name();
        let present: Vec<LafFamily> = LafFamily::ALL
            .into_iter()
            .filter(|family| source.has_field(&family.column_names()[0]))
            .collect();

        match present.as_slice() {
            [] => Ok(None),
            [family] => {
                let [_, low, high] = family.column_names();
                if !source.has_field(&low) || !source.has_field(&high) {
                    return Err(StoreError::format(
                        file,
                        format!("low/highLAF{} columns expected", family.suffix()),
                    ));
                }
                Ok(Some(*family))
            }
            _ => Err(StoreError::format(file, "multiple LAF types")),
        }
    }
}

/// Column positions of a bound LAF family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LafColumns {
    pub family: LafFamily,
    pub best: usize,
    pub low: usize,
    pub high: usize,
}

impl LafColumns {
    /// Detect and bind the LAF family of a source; `None` when it has no LAF columns.
    pub fn bind<S: RowSource + ?Sized>(source: &S) -> Result<Option<Self>> {
        let Some(family) = LafFamily::detect(source)? else {
            return Ok(None);
        };
        let [best, low, high] = family.column_names();
        Ok(Some(LafColumns {
            family,
            best: source.require_field(&best)?,
            low: source.require_field(&low)?,
            high: source.require_field(&high)?,
        }))
    }
}
