//! anno-sweep: point-in-interval annotation of genomic positions.
//!
//! Given annotation records (genes or other features) and point queries,
//! both grouped by chromosome, reports every annotation interval that each
//! query position falls inside.
//!
//! # Features
//!
//! - **End-sorted sweep**: one forward-only cursor per chromosome, with a
//!   look-ahead bounded by the chromosome's widest interval
//! - **Parallel processing**: Uses Rayon to sweep chromosomes independently
//! - **Lazy matching**: matches are produced on demand, never materialized
//!   unless requested
//!
//! # Example
//!
//! ```rust,no_run
//! use anno_sweep::{match_queries, Catalog, QuerySet};
//!
//! let catalog = Catalog::from_path("genes.tsv").unwrap();
//! let queries = QuerySet::from_path("positions.tsv").unwrap();
//!
//! for m in match_queries(&catalog, &queries) {
//!     println!("{}", m);
//! }
//! ```

pub mod catalog;
pub mod commands;
pub mod config;
pub mod interval;
pub mod output;
pub mod parallel;
pub mod parsing;
pub mod queries;
pub mod records;
pub mod sweep;

// Re-export commonly used types
pub use catalog::{build_catalog, Catalog, ChromCatalog};
pub use commands::{match_queries, AnnotateCommand};
pub use interval::{AnnotationInterval, Coord, QueryPosition};
pub use parallel::match_parallel;
pub use queries::{load_queries, QuerySet};
pub use records::{AnnotationReader, QueryReader, RecordError};
pub use sweep::{sweep_chromosome, ChromSweep, Match, SweepStats};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::catalog::{build_catalog, Catalog, ChromCatalog};
    pub use crate::commands::{match_queries, AnnotateCommand};
    pub use crate::interval::{AnnotationInterval, Coord, QueryPosition};
    pub use crate::parallel::match_parallel;
    pub use crate::queries::{load_queries, QuerySet};
    pub use crate::records::{parse_annotations, parse_queries, RecordError};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_basic_workflow() {
        use crate::prelude::*;

        let catalog = build_catalog(
            parse_annotations("chr1\tA\tB\t100\t201\tGENE1\n")
                .unwrap()
                .into_iter()
                .map(Ok),
        )
        .unwrap();
        let queries = load_queries(
            parse_queries("chr1\t201\nchr1\t100\nchr1\t200\n")
                .unwrap()
                .into_iter()
                .map(Ok),
        )
        .unwrap();

        let lines: Vec<String> = match_queries(&catalog, &queries)
            .map(|m| m.to_string())
            .collect();

        assert_eq!(
            lines,
            vec![
                "chr1\t100\tchr1\tA\tB\t100\t201\tGENE1",
                "chr1\t200\tchr1\tA\tB\t100\t201\tGENE1",
            ]
        );
    }
}
