//! Core annotation interval type.

use std::fmt;

/// Genomic coordinate. Signed so that an end field of `0` converts to an
/// inclusive end of `-1` instead of wrapping.
pub type Coord = i64;

/// Largest coordinate magnitude accepted from input. Differences of any
/// two accepted coordinates (plus one) stay well inside `Coord`.
pub const MAX_COORD: Coord = 1 << 60;

/// One annotation record anchored on a chromosome.
/// Uses 1-based, fully inclusive coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnnotationInterval {
    pub chrom: String,
    pub start: Coord,
    pub end: Coord,
    /// The original record text, without its line terminator.
    pub payload: String,
}

impl AnnotationInterval {
    /// Create a new interval from already-converted inclusive coordinates.
    #[inline]
    pub fn new(chrom: impl Into<String>, start: Coord, end: Coord, payload: impl Into<String>) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            payload: payload.into(),
        }
    }

    /// Inclusive length, `end - start + 1`.
    /// Zero or negative for a degenerate interval. Saturates instead of
    /// overflowing for coordinates outside `MAX_COORD`.
    #[inline]
    pub fn span(&self) -> Coord {
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    /// Returns true if the interval covers no position.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.end < self.start
    }

    /// Check whether `pos` lies inside `[start, end]`.
    #[inline]
    pub fn contains(&self, pos: Coord) -> bool {
        self.start <= pos && pos <= self.end
    }
}

impl fmt::Display for AnnotationInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.payload)
    }
}

/// A point query: one position on one chromosome.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryPosition {
    pub chrom: String,
    pub position: Coord,
}

impl QueryPosition {
    #[inline]
    pub fn new(chrom: impl Into<String>, position: Coord) -> Self {
        Self {
            chrom: chrom.into(),
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span() {
        let iv = AnnotationInterval::new("chr1", 100, 200, "");
        assert_eq!(iv.span(), 101);

        let single = AnnotationInterval::new("chr1", 100, 100, "");
        assert_eq!(single.span(), 1);
        assert!(!single.is_degenerate());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let iv = AnnotationInterval::new("chr1", 100, 200, "");

        assert!(iv.contains(100));
        assert!(iv.contains(200));
        assert!(!iv.contains(99));
        assert!(!iv.contains(201));
    }

    #[test]
    fn test_degenerate() {
        let iv = AnnotationInterval::new("chr1", 100, 99, "");
        assert!(iv.is_degenerate());
        assert_eq!(iv.span(), 0);
        assert!(!iv.contains(99));
        assert!(!iv.contains(100));
    }

    #[test]
    fn test_span_saturates_at_extremes() {
        let iv = AnnotationInterval::new("chr1", -i64::MAX, i64::MAX, "");
        assert_eq!(iv.span(), i64::MAX);

        let inverted = AnnotationInterval::new("chr1", i64::MAX, -i64::MAX, "");
        assert_eq!(inverted.span(), i64::MIN + 1);
        assert!(inverted.is_degenerate());
    }

    #[test]
    fn test_display_prints_payload() {
        let iv = AnnotationInterval::new("chr1", 100, 200, "chr1\tA\tB\t100\t201\tGENE1");
        assert_eq!(iv.to_string(), "chr1\tA\tB\t100\t201\tGENE1");
    }
}
