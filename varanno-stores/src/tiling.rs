use tracing::{debug, warn};

use varanno_core::models::{ContigProvider, Range};
use varanno_overlaprs::RangeIntersector;

use crate::error::{Result, StoreError};
use crate::store::RangeAnnotationStore;

/// The window `[m - w/2, m + (w - w/2))` centred on midpoint `m`; odd widths put the extra
/// base after the midpoint.
pub fn midpoint_window(midpoint: u32, window_width: u32) -> (i64, i64) {
    let midpoint = i64::from(midpoint);
    let half = i64::from(window_width / 2);
    (midpoint - half, midpoint + (i64::from(window_width) - half))
}

impl<T: Clone, I: RangeIntersector<T> + Default> RangeAnnotationStore<T, I> {
    ///
    /// Rebuild the full windows of a store loaded from midpoints.
    ///
    /// Every entry is expected to be the one-base range `[m, m+1)` of its midpoint. For each
    /// contig the entries are visited in ascending order and widened to `window_width` bases
    /// around their midpoint; the last window of the contig is stretched or cut to end exactly
    /// at the contig end, so the windows cover the contig without gaps. The rebuilt windows
    /// replace the index. Entries outside every contig are dropped.
    ///
    /// # Arguments
    /// - contigs: provider of the contigs to tile
    /// - window_width: width of each window, in bases
    pub fn tile_midpoints<C: ContigProvider + ?Sized>(&mut self, contigs: &C, window_width: u32) -> Result<()> {
        let mut tiled = I::default();

        for contig in contigs.contigs() {
            let mut entries = self.index.intersect(&contig);
            entries.sort_by(|a, b| a.range().cmp(b.range()));

            let last = entries.len().saturating_sub(1);
            for (n, entry) in entries.iter().enumerate() {
                let (begin, mut end) = midpoint_window(entry.range().begin, window_width);

                let fits_begin = begin >= i64::from(contig.begin);
                let fits_end = n == last || end <= i64::from(contig.end);
                if !fits_begin || !fits_end {
                    return Err(StoreError::Geometry {
                        file: self.metadata.file_name().to_string(),
                        chromosome: contigs
                            .chromosome_name(contig.chromosome)
                            .unwrap_or("?")
                            .to_string(),
                        begin,
                        end,
                        contig,
                    });
                }
                if n == last {
                    end = i64::from(contig.end);
                }

                // both ends were checked against the contig above
                let window = Range::new(contig.chromosome, begin as u32, end as u32);
                tiled.put(window, entry.payload().clone());
            }

            debug!(
                file = self.metadata.file_name(),
                contig = %contig,
                windows = entries.len(),
                "tiled contig"
            );
        }

        let dropped = self.index.len().saturating_sub(tiled.len());
        if dropped > 0 {
            warn!(
                file = self.metadata.file_name(),
                dropped, "records outside every contig were dropped while tiling"
            );
        }

        self.index = tiled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use varanno_core::models::ChromosomeTable;
    use varanno_io::Metadata;

    #[fixture]
    fn contigs() -> ChromosomeTable {
        ChromosomeTable::from_sizes([("chr1", 1000), ("chr2", 130)]).unwrap()
    }

    fn windowed(midpoints: &[(u16, u32)]) -> RangeAnnotationStore<u32> {
        let mut store = RangeAnnotationStore::new();
        store.metadata = Metadata::new("cnvDetails.tsv");
        for &(chromosome, midpoint) in midpoints {
            store.index.put(Range::new(chromosome, midpoint, midpoint + 1), midpoint);
        }
        store
    }

    fn windows(store: &RangeAnnotationStore<u32>, contig: Range) -> Vec<(Range, u32)> {
        let mut windows: Vec<(Range, u32)> = store
            .intersect(&contig)
            .into_iter()
            .map(|e| (*e.range(), *e.payload()))
            .collect();
        windows.sort();
        windows
    }

    #[rstest]
    #[case(100, 50, (0, 100))]
    #[case(100, 950, (900, 1000))]
    #[case(5, 10, (8, 13))]
    #[case(1, 10, (10, 11))]
    fn test_midpoint_window(#[case] width: u32, #[case] midpoint: u32, #[case] expected: (i64, i64)) {
        assert_eq!(midpoint_window(midpoint, width), expected);
    }

    #[rstest]
    fn test_tiles_whole_contig(contigs: ChromosomeTable) {
        let midpoints: Vec<(u16, u32)> = (0..10).rev().map(|i| (0, 50 + 100 * i)).collect();
        let mut store = windowed(&midpoints);
        store.tile_midpoints(&contigs, 100).unwrap();

        let expected: Vec<(Range, u32)> = (0..10)
            .map(|i| (Range::new(0, 100 * i, 100 * (i + 1)), 50 + 100 * i))
            .collect();
        assert_eq!(windows(&store, Range::new(0, 0, 1000)), expected);
        assert_eq!(store.len(), 10);
    }

    #[rstest]
    fn test_last_window_ends_at_contig_end(contigs: ChromosomeTable) {
        // chr2 is 130 bases long; the second window would end at 150
        let mut store = windowed(&[(1, 25), (1, 75), (1, 125)]);
        store.tile_midpoints(&contigs, 50).unwrap();

        assert_eq!(
            windows(&store, Range::new(1, 0, 130)),
            vec![
                (Range::new(1, 0, 50), 25),
                (Range::new(1, 50, 100), 75),
                (Range::new(1, 100, 130), 125),
            ]
        );

        let mut store = windowed(&[(1, 25), (1, 75)]);
        store.tile_midpoints(&contigs, 50).unwrap();
        assert_eq!(
            windows(&store, Range::new(1, 0, 130)),
            vec![(Range::new(1, 0, 50), 25), (Range::new(1, 50, 130), 75)]
        );
    }

    #[rstest]
    fn test_tiling_is_gapless(contigs: ChromosomeTable) {
        let midpoints: Vec<(u16, u32)> = (0..50).map(|i| (0, 10 + 20 * i)).collect();
        let mut store = windowed(&midpoints);
        store.tile_midpoints(&contigs, 20).unwrap();

        let tiles = windows(&store, Range::new(0, 0, 1000));
        assert_eq!(tiles.first().map(|(r, _)| r.begin), Some(0));
        assert_eq!(tiles.last().map(|(r, _)| r.end), Some(1000));
        for pair in tiles.windows(2) {
            assert_eq!(pair[0].0.end, pair[1].0.begin);
        }
    }

    #[rstest]
    fn test_window_before_contig_begin(contigs: ChromosomeTable) {
        let mut store = windowed(&[(0, 20), (0, 120)]);
        let err = store.tile_midpoints(&contigs, 100).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Geometry {
                begin: -30,
                end: 70,
                ..
            }
        ));
        assert!(err.to_string().contains("cnvDetails.tsv"));
    }

    #[rstest]
    fn test_window_past_contig_end(contigs: ChromosomeTable) {
        let mut store = windowed(&[(1, 50), (1, 100), (1, 120)]);
        let err = store.tile_midpoints(&contigs, 100).unwrap_err();
        assert!(matches!(err, StoreError::Geometry { begin: 50, end: 150, .. }));
    }
}
