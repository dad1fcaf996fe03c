//! Per-chromosome interval catalog, sorted by interval end.

use crate::interval::{AnnotationInterval, Coord};
use crate::records::{AnnotationReader, Result};
use rustc_hash::FxHashMap;
use std::io::Read;
use std::path::Path;

/// One chromosome's intervals in non-decreasing `end` order, plus the
/// largest span among them.
#[derive(Debug, Clone)]
pub struct ChromCatalog {
    chrom: String,
    intervals: Vec<AnnotationInterval>,
    max_span: Coord,
}

impl ChromCatalog {
    /// Sort `intervals` by end and compute the maximum span.
    ///
    /// The sort is stable: intervals sharing an end keep their load order.
    pub fn new(chrom: impl Into<String>, mut intervals: Vec<AnnotationInterval>) -> Self {
        intervals.sort_by_key(|iv| iv.end);
        // Degenerate intervals have span <= 0 and never raise the bound.
        let max_span = intervals.iter().map(AnnotationInterval::span).max().unwrap_or(0).max(0);
        Self {
            chrom: chrom.into(),
            intervals,
            max_span,
        }
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn intervals(&self) -> &[AnnotationInterval] {
        &self.intervals
    }

    /// Largest `end - start + 1` on this chromosome.
    pub fn max_span(&self) -> Coord {
        self.max_span
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Check the ordering invariant the sweep relies on.
    pub fn is_end_sorted(&self) -> bool {
        self.intervals.windows(2).all(|w| w[0].end <= w[1].end)
    }
}

/// Interval catalog keyed by chromosome.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    by_chrom: FxHashMap<String, ChromCatalog>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from already-parsed intervals.
    pub fn from_intervals(intervals: Vec<AnnotationInterval>) -> Self {
        let mut groups: FxHashMap<String, Vec<AnnotationInterval>> = FxHashMap::default();
        for interval in intervals {
            groups
                .entry(interval.chrom.clone())
                .or_default()
                .push(interval);
        }

        let by_chrom = groups
            .into_iter()
            .map(|(chrom, intervals)| {
                let entry = ChromCatalog::new(chrom.clone(), intervals);
                (chrom, entry)
            })
            .collect();

        Self { by_chrom }
    }

    /// Load a catalog from any readable annotation source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        build_catalog(AnnotationReader::new(reader).records())
    }

    /// Load a catalog from an annotation file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        build_catalog(AnnotationReader::from_path(path)?.records())
    }

    /// Catalog entry for a chromosome, if any interval was loaded for it.
    pub fn get(&self, chrom: &str) -> Option<&ChromCatalog> {
        self.by_chrom.get(chrom)
    }

    /// Get all chromosomes in the catalog (unordered).
    pub fn chromosomes(&self) -> impl Iterator<Item = &String> {
        self.by_chrom.keys()
    }

    /// Number of chromosomes.
    pub fn len(&self) -> usize {
        self.by_chrom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_chrom.is_empty()
    }

    /// Total number of intervals across all chromosomes.
    pub fn interval_count(&self) -> usize {
        self.by_chrom.values().map(ChromCatalog::len).sum()
    }
}

/// Build a catalog from a stream of parsed records.
///
/// The first error aborts the build; no partial catalog is returned.
pub fn build_catalog<I>(records: I) -> Result<Catalog>
where
    I: IntoIterator<Item = Result<AnnotationInterval>>,
{
    let intervals = records.into_iter().collect::<Result<Vec<_>>>()?;
    let catalog = Catalog::from_intervals(intervals);
    log::info!(
        "Loaded {} annotation intervals on {} chromosome(s).",
        catalog.interval_count(),
        catalog.len()
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{parse_annotations, RecordError};

    fn iv(chrom: &str, start: Coord, end: Coord, tag: &str) -> AnnotationInterval {
        AnnotationInterval::new(chrom, start, end, tag)
    }

    #[test]
    fn test_sorted_by_end() {
        let entry = ChromCatalog::new(
            "chr1",
            vec![
                iv("chr1", 10, 500, "wide"),
                iv("chr1", 100, 200, "a"),
                iv("chr1", 5, 20, "b"),
            ],
        );

        let ends: Vec<Coord> = entry.intervals().iter().map(|i| i.end).collect();
        assert_eq!(ends, vec![20, 200, 500]);
        assert!(entry.is_end_sorted());
    }

    #[test]
    fn test_tied_ends_keep_load_order() {
        let entry = ChromCatalog::new(
            "chr1",
            vec![
                iv("chr1", 90, 100, "first"),
                iv("chr1", 10, 50, "early"),
                iv("chr1", 50, 100, "second"),
                iv("chr1", 1, 100, "third"),
            ],
        );

        let tags: Vec<&str> = entry.intervals().iter().map(|i| i.payload.as_str()).collect();
        assert_eq!(tags, vec!["early", "first", "second", "third"]);
    }

    #[test]
    fn test_max_span() {
        let entry = ChromCatalog::new(
            "chr1",
            vec![iv("chr1", 100, 200, "a"), iv("chr1", 10, 50, "b")],
        );
        assert_eq!(entry.max_span(), 101);
    }

    #[test]
    fn test_max_span_ignores_degenerate() {
        let entry = ChromCatalog::new("chr1", vec![iv("chr1", 100, 99, "d")]);
        assert_eq!(entry.max_span(), 0);
    }

    #[test]
    fn test_group_by_chromosome() {
        let catalog = Catalog::from_intervals(vec![
            iv("chr1", 100, 200, "a"),
            iv("chr2", 100, 200, "b"),
            iv("chr1", 300, 400, "c"),
        ]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.interval_count(), 3);
        assert_eq!(catalog.get("chr1").unwrap().len(), 2);
        assert_eq!(catalog.get("chr2").unwrap().len(), 1);
        assert!(catalog.get("chr3").is_none());
    }

    #[test]
    fn test_build_catalog_from_text() {
        let content = "chr1\tA\tB\t100\t201\tGENE1\nchr1\tA\tB\t10\t31\tGENE0\n";
        let catalog = build_catalog(parse_annotations(content).unwrap().into_iter().map(Ok)).unwrap();

        let entry = catalog.get("chr1").unwrap();
        assert_eq!(entry.intervals()[0].payload, "chr1\tA\tB\t10\t31\tGENE0");
        assert_eq!(entry.max_span(), 101);
    }

    #[test]
    fn test_build_aborts_on_first_error() {
        let records = vec![
            Ok(iv("chr1", 1, 10, "ok")),
            Err(RecordError::Malformed {
                line: 2,
                message: "bad".to_string(),
            }),
            Ok(iv("chr1", 1, 10, "never")),
        ];
        assert!(build_catalog(records).is_err());
    }

    #[test]
    fn test_from_reader_malformed() {
        let content = "chr1\tA\tB\t100\t201\nchr1\tA\n";
        assert!(matches!(
            Catalog::from_reader(content.as_bytes()),
            Err(RecordError::Malformed { line: 2, .. })
        ));
    }
}
