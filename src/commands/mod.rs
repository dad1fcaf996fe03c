//! Command implementations for anno-sweep.

pub mod annotate;

pub use annotate::{match_queries, AnnotateCommand};
