//! Per-chromosome query positions, sorted ascending.

use crate::interval::{Coord, QueryPosition};
use crate::records::{QueryReader, Result};
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Query positions grouped by chromosome.
///
/// Chromosomes keep the order in which they first appear in the input so
/// that output across chromosomes is deterministic.
#[derive(Debug, Clone, Default)]
pub struct QuerySet {
    positions: FxHashMap<String, Vec<Coord>>,
    order: Vec<String>,
}

impl QuerySet {
    /// Group and sort already-parsed queries. Duplicates are kept.
    pub fn from_queries(queries: Vec<QueryPosition>) -> Self {
        let mut positions: FxHashMap<String, Vec<Coord>> = FxHashMap::default();
        let mut order = Vec::new();

        for query in queries {
            match positions.get_mut(&query.chrom) {
                Some(list) => list.push(query.position),
                None => {
                    order.push(query.chrom.clone());
                    positions.insert(query.chrom, vec![query.position]);
                }
            }
        }

        // Duplicates are indistinguishable, so an unstable sort is fine
        for list in positions.values_mut() {
            list.sort_unstable();
        }

        Self { positions, order }
    }

    /// Load queries from any readable source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        load_queries(QueryReader::new(reader).records())
    }

    /// Load queries from a file, or from stdin when the path is `-`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str() == "-" {
            Self::from_reader(io::stdin().lock())
        } else {
            Self::from_reader(File::open(path)?)
        }
    }

    /// Ascending positions for one chromosome.
    pub fn positions(&self, chrom: &str) -> Option<&[Coord]> {
        self.positions.get(chrom).map(Vec::as_slice)
    }

    /// Chromosomes with their positions, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Coord])> {
        self.order
            .iter()
            .filter_map(|chrom| self.positions.get(chrom).map(|p| (chrom.as_str(), p.as_slice())))
    }

    /// Number of chromosomes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total number of positions, duplicates included.
    pub fn position_count(&self) -> usize {
        self.positions.values().map(Vec::len).sum()
    }
}

/// Load a query set from a stream of parsed records.
///
/// The first error aborts the load.
pub fn load_queries<I>(records: I) -> Result<QuerySet>
where
    I: IntoIterator<Item = Result<QueryPosition>>,
{
    let queries = records.into_iter().collect::<Result<Vec<_>>>()?;
    let set = QuerySet::from_queries(queries);
    log::info!(
        "Loaded {} query positions on {} chromosome(s).",
        set.position_count(),
        set.len()
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::RecordError;

    #[test]
    fn test_sorted_ascending() {
        let set = QuerySet::from_reader("chr1\t300\nchr1\t100\nchr1\t200\n".as_bytes()).unwrap();
        assert_eq!(set.positions("chr1").unwrap(), &[100, 200, 300]);
    }

    #[test]
    fn test_duplicates_preserved() {
        let set = QuerySet::from_reader("chr1\t50\nchr1\t10\nchr1\t50\n".as_bytes()).unwrap();
        assert_eq!(set.positions("chr1").unwrap(), &[10, 50, 50]);
        assert_eq!(set.position_count(), 3);
    }

    #[test]
    fn test_first_seen_order() {
        let set = QuerySet::from_queries(vec![
            QueryPosition::new("chr2", 1),
            QueryPosition::new("chr1", 1),
            QueryPosition::new("chr2", 2),
            QueryPosition::new("chrX", 1),
        ]);

        let chroms: Vec<&str> = set.iter().map(|(c, _)| c).collect();
        assert_eq!(chroms, vec!["chr2", "chr1", "chrX"]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_missing_chromosome() {
        let set = QuerySet::from_queries(vec![QueryPosition::new("chr1", 1)]);
        assert!(set.positions("chr9").is_none());
    }

    #[test]
    fn test_malformed_aborts_load() {
        let result = QuerySet::from_reader("chr1\t10\nchr1\tten\n".as_bytes());
        assert!(matches!(result, Err(RecordError::Malformed { line: 2, .. })));
    }

    #[test]
    fn test_empty_input() {
        let set = QuerySet::from_reader("".as_bytes()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.position_count(), 0);
    }
}
