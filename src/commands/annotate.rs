//! Annotate command implementation - point-in-interval lookup.

use crate::catalog::Catalog;
use crate::output::MatchWriter;
use crate::parallel::{sweep_parallel, total_stats, PARALLEL_THRESHOLD};
use crate::queries::QuerySet;
use crate::records::Result;
use crate::sweep::{sweep_chromosome, Match, SweepStats};
use std::io::Write;
use std::path::Path;

/// Lazily produce every match, one chromosome at a time.
///
/// Chromosomes are visited in the query set's first-seen order. A query
/// chromosome with no catalog entry yields nothing.
pub fn match_queries<'a>(
    catalog: &'a Catalog,
    queries: &'a QuerySet,
) -> impl Iterator<Item = Match<'a>> + 'a {
    queries
        .iter()
        .filter_map(move |(chrom, positions)| match catalog.get(chrom) {
            Some(entry) => Some(sweep_chromosome(entry, positions)),
            None => {
                log::debug!(
                    "No annotations on {chrom}; skipping {} position(s).",
                    positions.len()
                );
                None
            }
        })
        .flatten()
}

/// Annotate command configuration.
#[derive(Debug, Clone)]
pub struct AnnotateCommand {
    /// Process chromosomes in parallel
    pub parallel: bool,
    /// Print run statistics to stderr when done
    pub stats: bool,
}

impl Default for AnnotateCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotateCommand {
    pub fn new() -> Self {
        Self {
            parallel: true,
            stats: false,
        }
    }

    /// Write every match for `queries` against `catalog`.
    pub fn annotate<W: Write>(
        &self,
        catalog: &Catalog,
        queries: &QuerySet,
        output: W,
    ) -> Result<SweepStats> {
        let mut writer = MatchWriter::new(output);

        let stats = if self.parallel && queries.position_count() >= PARALLEL_THRESHOLD {
            let results = sweep_parallel(catalog, queries);
            for result in &results {
                writer.write_matches(result.matches.iter().copied())?;
            }
            total_stats(&results)
        } else {
            self.annotate_sequential(catalog, queries, &mut writer)?
        };

        writer.flush()?;
        if self.stats {
            eprintln!("Annotate stats: {}", stats);
        } else {
            log::info!("{}", stats);
        }
        Ok(stats)
    }

    fn annotate_sequential<W: Write>(
        &self,
        catalog: &Catalog,
        queries: &QuerySet,
        writer: &mut MatchWriter<W>,
    ) -> Result<SweepStats> {
        let mut stats = SweepStats::default();

        for (chrom, positions) in queries.iter() {
            let Some(entry) = catalog.get(chrom) else {
                log::debug!(
                    "No annotations on {chrom}; skipping {} position(s).",
                    positions.len()
                );
                stats.chromosomes_skipped += 1;
                continue;
            };

            let mut sweep = sweep_chromosome(entry, positions);
            for m in sweep.by_ref() {
                writer.write_match(&m)?;
            }
            stats.record(&sweep);
        }

        Ok(stats)
    }

    /// Execute the annotate command on files.
    ///
    /// The query path may be `-` to read from stdin.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>, W: Write>(
        &self,
        annotation_path: P,
        query_path: Q,
        output: W,
    ) -> Result<SweepStats> {
        let catalog = Catalog::from_path(annotation_path)?;
        let queries = QuerySet::from_path(query_path)?;
        self.annotate(&catalog, &queries, output)
    }
}
