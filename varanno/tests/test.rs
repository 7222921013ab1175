#![cfg(all(feature = "annotate", feature = "stores"))]

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;

use pretty_assertions::assert_eq;
use rstest::*;

use varanno::annotate::{Annotator, Locus};
use varanno::core::models::{ChromosomeTable, ContigProvider, Range};
use varanno::io::Metadata;
use varanno::stores::{CnvDetailStore, SegDupStore};

#[fixture]
fn path_to_data() -> PathBuf {
    PathBuf::from("../tests/data")
}

fn gzip_writer(path: &Path) -> GzEncoder<File> {
    GzEncoder::new(File::create(path).unwrap(), Compression::default())
}

#[fixture]
fn contigs(path_to_data: PathBuf) -> ChromosomeTable {
    ChromosomeTable::from_chrom_sizes(path_to_data.join("stores/chrom.sizes")).unwrap()
}

mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[rstest]
    fn test_gzipped_cnv_details_match_plain(path_to_data: PathBuf, contigs: ChromosomeTable) {
        let plain = path_to_data.join("stores/cnvDetails.tsv");

        let dir = tempfile::tempdir().unwrap();
        let gzipped = dir.path().join("cnvDetails.tsv.gz");
        let mut encoder = gzip_writer(&gzipped);
        encoder
            .write_all(&std::fs::read(&plain).unwrap())
            .unwrap();
        encoder.finish().unwrap();

        let from_plain = CnvDetailStore::open(&plain, &contigs).unwrap();
        let from_gzipped = CnvDetailStore::open(&gzipped, &contigs).unwrap();

        for contig in contigs.contigs() {
            let mut a: Vec<Range> = from_plain.intersect(&contig).iter().map(|e| *e.range()).collect();
            let mut b: Vec<Range> = from_gzipped.intersect(&contig).iter().map(|e| *e.range()).collect();
            a.sort();
            b.sort();
            assert_eq!(a, b);
            assert_eq!(a.last().map(|r| r.end), Some(contig.end));
        }
    }

    #[rstest]
    fn test_tiling_covers_every_contig(path_to_data: PathBuf, contigs: ChromosomeTable) {
        let store = CnvDetailStore::open(path_to_data.join("stores/cnvDetails.tsv"), &contigs).unwrap();

        for contig in contigs.contigs() {
            let mut windows: Vec<Range> = store.intersect(&contig).iter().map(|e| *e.range()).collect();
            windows.sort();

            assert_eq!(windows.first().map(|r| r.begin), Some(contig.begin));
            assert_eq!(windows.last().map(|r| r.end), Some(contig.end));
            for pair in windows.windows(2) {
                assert_eq!(pair[0].end, pair[1].begin);
            }
        }
    }

    #[rstest]
    fn test_annotate_variant_loci(path_to_data: PathBuf) {
        let annotator = Annotator::from_config(path_to_data.join("annotate/annotate.toml")).unwrap();
        let chr1 = annotator.contigs().chromosome_id("chr1").unwrap();
        let chr2 = annotator.contigs().chromosome_id("chr2").unwrap();

        let mut variant = Metadata::new("var-GS00001-DNA_A01.tsv");
        variant.add("ASSEMBLY_ID", "GS00001-DNA_A01_ASM");
        variant.add("GENOME_REFERENCE", "NCBI build 37");
        let mut output = Metadata::new("annotated.tsv");
        annotator.add_meta(&mut output, &variant).unwrap();

        let mut out = Vec::new();
        output.write_header(&mut out).unwrap();
        writeln!(out, "{}", annotator.header_line(&["chromosome", "begin", "end"])).unwrap();

        let loci = [
            Locus::new(Range::new(chr1, 6400, 6401)),
            Locus::ref_call(Range::new(chr1, 1900, 2000)),
            Locus::new(Range::new(chr2, 150, 152)),
        ];
        for locus in &loci {
            let name = annotator.contigs().chromosome_name(locus.range.chromosome).unwrap();
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                name,
                locus.range.begin,
                locus.range.end,
                annotator.annotate(locus)
            )
            .unwrap();
        }

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "#SEGDUP_GENERATED_AT\t2010-Nov-05 10:33");
        assert_eq!(
            &lines[lines.len() - 3..],
            &[
                "chr1\t6400\t6401\t\t\t1.53\t3\t1.53\t1.5\t0.33\t0.29\t0.36",
                "chr1\t1900\t2000\t\t\t0.91\t2\t0.91\t1.0\t0.48\t0.42\t0.50",
                "chr2\t150\t152\t4\t\t1.01\t2\t1.01\t1.0\t0.47\t0.41\t0.50",
            ]
        );
    }

    #[rstest]
    fn test_segdup_store_from_data(path_to_data: PathBuf, contigs: ChromosomeTable) {
        let store = SegDupStore::open(path_to_data.join("stores/segdup.tsv"), &contigs).unwrap();
        let chr2 = contigs.chromosome_id("chr2").unwrap();
        assert_eq!(store.best_overlapping(&Range::new(chr2, 0, 5000)).map(|d| d.count), Some(4));
    }
}
