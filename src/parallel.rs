//! Per-chromosome parallel sweeps using Rayon.
//!
//! Chromosomes share no state: each worker borrows one catalog entry and
//! one position list and owns its cursor. Results are concatenated in the
//! query set's chromosome order, so output matches the sequential path.

use crate::catalog::Catalog;
use crate::interval::Coord;
use crate::queries::QuerySet;
use crate::sweep::{sweep_chromosome, Match, SweepStats};
use rayon::prelude::*;

/// Minimum number of query positions before enabling parallelization.
/// Below this threshold, sequential processing is faster due to
/// thread spawn overhead.
pub const PARALLEL_THRESHOLD: usize = 10_000;

/// Matches and statistics for one chromosome.
#[derive(Debug, Clone)]
pub struct ChromResult<'a> {
    pub chrom: &'a str,
    pub matches: Vec<Match<'a>>,
    pub stats: SweepStats,
}

/// Sweep one chromosome to completion.
fn sweep_one<'a>(catalog: &'a Catalog, chrom: &'a str, positions: &'a [Coord]) -> ChromResult<'a> {
    let mut stats = SweepStats::default();
    let matches = match catalog.get(chrom) {
        Some(entry) => {
            let mut sweep = sweep_chromosome(entry, positions);
            let matches: Vec<Match<'a>> = sweep.by_ref().collect();
            stats.record(&sweep);
            log::debug!(
                "Swept {} position(s) on {chrom}: {} hit(s).",
                positions.len(),
                matches.len()
            );
            matches
        }
        None => {
            log::debug!(
                "No annotations on {chrom}; skipping {} position(s).",
                positions.len()
            );
            stats.chromosomes_skipped = 1;
            Vec::new()
        }
    };

    ChromResult {
        chrom,
        matches,
        stats,
    }
}

/// Sweep every query chromosome in parallel.
///
/// The returned results are in the query set's first-seen chromosome order.
pub fn sweep_parallel<'a>(catalog: &'a Catalog, queries: &'a QuerySet) -> Vec<ChromResult<'a>> {
    let work: Vec<(&'a str, &'a [Coord])> = queries.iter().collect();
    work.into_par_iter()
        .map(|(chrom, positions)| sweep_one(catalog, chrom, positions))
        .collect()
}

/// Collect all matches using one worker per chromosome.
pub fn match_parallel<'a>(catalog: &'a Catalog, queries: &'a QuerySet) -> Vec<Match<'a>> {
    sweep_parallel(catalog, queries)
        .into_iter()
        .flat_map(|result| result.matches)
        .collect()
}

/// Sum the statistics of a set of chromosome results.
pub fn total_stats(results: &[ChromResult<'_>]) -> SweepStats {
    let mut stats = SweepStats::default();
    for result in results {
        stats.merge(&result.stats);
    }
    stats
}
