//! End-sorted sweep of ascending query positions over one chromosome.
//!
//! Intervals are ordered by `end`, queries ascend, and a single cursor
//! only ever moves forward. For each position the scan starts at the
//! cursor and classifies each interval it meets:
//!
//! - `p > end`: the interval lies entirely before `p` and before every
//!   later position. The cursor may move past it once this position is done.
//! - `start <= p <= end`: a hit. Scanning continues since overlapping
//!   intervals can share a point.
//! - `start > p` and `end - p <= max_span`: a wider interval further ahead
//!   may still start at or before `p`, so keep scanning.
//! - `end - p > max_span`: no interval from here on can reach back to `p`.
//!
//! # Complexity
//!
//! Moving the cursor costs O(intervals) for the whole chromosome. The
//! look-ahead for each position visits the intervals whose end lies within
//! `max_span` of it, so a chromosome with a few very wide intervals
//! degrades toward O(positions * intervals).

use crate::catalog::ChromCatalog;
use crate::interval::{AnnotationInterval, Coord};
use std::fmt;

/// One query position falling inside one annotation interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    pub chrom: &'a str,
    pub position: Coord,
    pub interval: &'a AnnotationInterval,
}

impl fmt::Display for Match<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.chrom, self.position, self.interval.payload)
    }
}

/// Forward-only cursor into an end-sorted interval slice.
///
/// While a position is scanned, every interval found entirely before it
/// raises the pending value. Committing applies the pending value if there
/// is one; otherwise the cursor keeps the value from an earlier position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepCursor {
    index: usize,
    pending: Option<usize>,
}

impl SweepCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index the next position's scan starts from.
    #[inline]
    pub fn position(&self) -> usize {
        self.index
    }

    /// Record that interval `i` ends before the current position.
    #[inline]
    pub fn mark_before(&mut self, i: usize) {
        self.pending = Some(i + 1);
    }

    /// Finish the current position.
    #[inline]
    pub fn commit(&mut self) {
        if let Some(next) = self.pending.take() {
            debug_assert!(next >= self.index);
            self.index = next;
        }
    }
}

/// Lazy producer of the matches for one chromosome.
///
/// Yields matches in ascending position order, and for a fixed position in
/// interval order (ascending end, ties in load order).
#[derive(Debug, Clone)]
pub struct ChromSweep<'a> {
    chrom: &'a str,
    intervals: &'a [AnnotationInterval],
    max_span: Coord,
    positions: &'a [Coord],
    cursor: SweepCursor,
    /// Index into `positions` of the position being scanned.
    pos_idx: usize,
    /// Index into `intervals` of the next interval to classify.
    scan_idx: usize,
    hits: usize,
    scanned: usize,
}

impl<'a> ChromSweep<'a> {
    /// Sweep `positions` (ascending) against `intervals` (ascending by end).
    pub fn new(
        chrom: &'a str,
        intervals: &'a [AnnotationInterval],
        max_span: Coord,
        positions: &'a [Coord],
    ) -> Self {
        debug_assert!(positions.windows(2).all(|w| w[0] <= w[1]));
        debug_assert!(intervals.windows(2).all(|w| w[0].end <= w[1].end));
        Self {
            chrom,
            intervals,
            max_span,
            positions,
            cursor: SweepCursor::new(),
            pos_idx: 0,
            scan_idx: 0,
            hits: 0,
            scanned: 0,
        }
    }

    /// Current cursor value.
    pub fn cursor(&self) -> usize {
        self.cursor.position()
    }

    /// Number of positions fully processed so far.
    pub fn positions_done(&self) -> usize {
        self.pos_idx
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    /// Number of interval classifications performed so far.
    pub fn intervals_scanned(&self) -> usize {
        self.scanned
    }

    /// Close the scan of the current position and move to the next one.
    #[inline]
    fn finish_position(&mut self) {
        self.cursor.commit();
        self.pos_idx += 1;
        self.scan_idx = self.cursor.position();
    }
}

impl<'a> Iterator for ChromSweep<'a> {
    type Item = Match<'a>;

    fn next(&mut self) -> Option<Match<'a>> {
        let intervals = self.intervals;
        while let Some(&p) = self.positions.get(self.pos_idx) {
            while let Some(interval) = intervals.get(self.scan_idx) {
                let i = self.scan_idx;
                self.scan_idx += 1;
                self.scanned += 1;

                if p > interval.end {
                    self.cursor.mark_before(i);
                } else if p >= interval.start {
                    self.hits += 1;
                    return Some(Match {
                        chrom: self.chrom,
                        position: p,
                        interval,
                    });
                } else if interval.end.saturating_sub(p) > self.max_span {
                    break;
                }
            }
            self.finish_position();
        }
        None
    }
}

/// Sweep one chromosome's ascending positions against its catalog entry.
pub fn sweep_chromosome<'a>(entry: &'a ChromCatalog, positions: &'a [Coord]) -> ChromSweep<'a> {
    ChromSweep::new(entry.chrom(), entry.intervals(), entry.max_span(), positions)
}

/// Statistics for an annotation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub positions: usize,
    pub hits: usize,
    pub intervals_scanned: usize,
    pub chromosomes_matched: usize,
    pub chromosomes_skipped: usize,
}

impl SweepStats {
    /// Fold a finished chromosome sweep into the totals.
    pub fn record(&mut self, sweep: &ChromSweep<'_>) {
        self.positions += sweep.positions_done();
        self.hits += sweep.hits();
        self.intervals_scanned += sweep.intervals_scanned();
        self.chromosomes_matched += 1;
    }

    pub fn merge(&mut self, other: &SweepStats) {
        self.positions += other.positions;
        self.hits += other.hits;
        self.intervals_scanned += other.intervals_scanned;
        self.chromosomes_matched += other.chromosomes_matched;
        self.chromosomes_skipped += other.chromosomes_skipped;
    }
}

impl fmt::Display for SweepStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Positions: {}, Hits: {}, Intervals scanned: {}, Chromosomes: {} matched / {} skipped",
            self.positions,
            self.hits,
            self.intervals_scanned,
            self.chromosomes_matched,
            self.chromosomes_skipped
        )
    }
}
